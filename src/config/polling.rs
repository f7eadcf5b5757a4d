//! Timer configuration: poll cadence and notification lifetime

use crate::dashboard::notifications::DEFAULT_TTL;
use crate::dashboard::scheduler::PollIntervals;
use serde::Deserialize;
use std::time::Duration;

/// Shortest accepted timer period; tokio intervals reject zero
const MIN_PERIOD_MS: u64 = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Polling
// ─────────────────────────────────────────────────────────────────────────────

/// Timer periods in milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    /// Time-of-day display refresh
    pub clock_ms: u64,
    /// Always-on snapshot poll
    pub baseline_ms: u64,
    /// Extra snapshot poll while the simulation runs
    pub accelerated_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            clock_ms: 1000,
            baseline_ms: 2000,
            accelerated_ms: 1000,
        }
    }
}

/// Polling settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePolling {
    pub clock_ms: Option<u64>,
    pub baseline_ms: Option<u64>,
    pub accelerated_ms: Option<u64>,
}

impl PollingConfig {
    pub fn from_file(file: Option<FilePolling>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            clock_ms: file.clock_ms.unwrap_or(defaults.clock_ms),
            baseline_ms: file.baseline_ms.unwrap_or(defaults.baseline_ms),
            accelerated_ms: file.accelerated_ms.unwrap_or(defaults.accelerated_ms),
        }
    }

    /// Scheduler periods, with too-short values raised to the minimum
    pub fn intervals(&self) -> PollIntervals {
        PollIntervals {
            clock: period(self.clock_ms),
            baseline: period(self.baseline_ms),
            accelerated: period(self.accelerated_ms),
        }
    }
}

fn period(ms: u64) -> Duration {
    Duration::from_millis(ms.max(MIN_PERIOD_MS))
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationsConfig {
    pub ttl_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL.as_millis() as u64,
        }
    }
}

/// Notification settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileNotifications {
    pub ttl_ms: Option<u64>,
}

impl NotificationsConfig {
    pub fn from_file(file: Option<FileNotifications>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            ttl_ms: file.ttl_ms.unwrap_or(Self::default().ttl_ms),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}
