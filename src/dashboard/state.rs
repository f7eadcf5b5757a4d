// Dashboard state - the single owned snapshot
//
// Holds the last fully-validated snapshot plus the request sequence numbers
// that guard it. Snapshots are only ever replaced wholesale; there is no
// per-field mutation API. Overlapping polls (baseline, accelerated, and the
// out-of-cycle poll after a reset) can complete out of order, so every
// request is stamped with a sequence number when it is issued and a response
// older than the one already applied is discarded on arrival.

use crate::client::Snapshot;

/// What changed when a snapshot was applied
///
/// Consumers use this to skip work for sections that didn't change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotChange {
    pub seq: u64,
    /// True for the first snapshot ever applied
    pub first: bool,
    pub simulating_changed: bool,
    pub metrics_changed: bool,
    pub trending_changed: bool,
    pub stats_changed: bool,
}

impl SnapshotChange {
    /// Whether the visible state is identical to before
    pub fn is_noop(&self) -> bool {
        !(self.first
            || self.simulating_changed
            || self.metrics_changed
            || self.trending_changed
            || self.stats_changed)
    }
}

/// Exclusively owned dashboard snapshot with a stale-response guard
#[derive(Debug, Default)]
pub struct DashboardState {
    snapshot: Option<Snapshot>,
    /// Highest sequence number applied so far
    applied_seq: Option<u64>,
    /// Next number handed out by `issue_seq`
    next_seq: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request. Call at issue time, not at completion time.
    pub fn issue_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn applied_seq(&self) -> Option<u64> {
        self.applied_seq
    }

    /// Apply a snapshot received for request `seq`
    ///
    /// Returns `None` (and leaves state untouched) when a newer response has
    /// already been applied. Equal sequence numbers are accepted.
    pub fn apply_snapshot(&mut self, seq: u64, snapshot: Snapshot) -> Option<SnapshotChange> {
        if let Some(applied) = self.applied_seq {
            if seq < applied {
                tracing::debug!(
                    "Discarding stale snapshot #{} (already applied #{})",
                    seq,
                    applied
                );
                return None;
            }
        }

        let change = match &self.snapshot {
            None => SnapshotChange {
                seq,
                first: true,
                simulating_changed: true,
                metrics_changed: true,
                trending_changed: true,
                stats_changed: true,
            },
            Some(prev) => SnapshotChange {
                seq,
                first: false,
                simulating_changed: prev.simulating != snapshot.simulating,
                metrics_changed: prev.metrics != snapshot.metrics,
                trending_changed: prev.trending != snapshot.trending,
                stats_changed: prev.stats != snapshot.stats,
            },
        };

        self.snapshot = Some(snapshot);
        self.applied_seq = Some(seq);
        // Keep issued numbers ahead of anything applied
        self.next_seq = self.next_seq.max(seq + 1);

        Some(change)
    }

    /// Current snapshot, or `None` before the first successful poll
    pub fn read(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Simulation flag of the current snapshot (false while empty)
    pub fn is_simulating(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.simulating)
    }
}
