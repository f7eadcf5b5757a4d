//! Dashboard core
//!
//! Owns everything the display reads: the current snapshot, the chart
//! windows, the notification stack and the membership-check panel. Both the
//! TUI and headless mode drive it the same way:
//!
//! - [`PollScheduler`] triggers go to [`Dashboard::handle_trigger`]
//! - user commands go to [`Dashboard::dispatch`]
//! - results from spawned fetch tasks come back as [`DashEvent`]s and go to
//!   [`Dashboard::handle_event`]
//!
//! All mutation happens on the task that owns the `Dashboard`; spawned tasks
//! only perform I/O and send their results back.

pub mod actions;
pub mod charts;
pub mod lists;
pub mod notifications;
pub mod scheduler;
pub mod state;

use crate::client::{Snapshot, StatsClient};
use crate::events::DashEvent;
use actions::{ActionDispatcher, Command, MembershipCheck};
use charts::ChartSeriesManager;
use chrono::{DateTime, Local};
use notifications::{Clock, NotificationQueue, SystemClock};
use scheduler::{PollSource, Trigger};
use state::DashboardState;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub struct Dashboard<C: Clock = SystemClock> {
    client: StatsClient,
    events: mpsc::Sender<DashEvent>,
    state: DashboardState,
    charts: ChartSeriesManager,
    notifications: NotificationQueue<C>,
    actions: ActionDispatcher,
    clock_text: String,
    poll_failures: u64,
    last_poll_at: Option<DateTime<Local>>,
    dirty: bool,
}

impl Dashboard<SystemClock> {
    pub fn new(client: StatsClient, events: mpsc::Sender<DashEvent>, ttl: Duration) -> Self {
        Self::with_clock(client, events, NotificationQueue::new(ttl))
    }
}

impl<C: Clock> Dashboard<C> {
    pub fn with_clock(
        client: StatsClient,
        events: mpsc::Sender<DashEvent>,
        notifications: NotificationQueue<C>,
    ) -> Self {
        Self {
            client,
            events,
            state: DashboardState::new(),
            charts: ChartSeriesManager::new(),
            notifications,
            actions: ActionDispatcher::new(),
            clock_text: clock_text(),
            poll_failures: 0,
            last_poll_at: None,
            dirty: true,
        }
    }

    /// Issue a snapshot fetch in the background
    ///
    /// The sequence number is taken now, so a slow response can't overwrite a
    /// newer one that was issued later. Returns that number.
    pub fn request_snapshot(&mut self, source: PollSource) -> u64 {
        let seq = self.state.issue_seq();
        let client = self.client.clone();
        let tx = self.events.clone();

        tracing::trace!("Polling snapshot #{} ({:?})", seq, source);
        tokio::spawn(async move {
            let result = client.fetch_snapshot().await;
            // Receiver gone means we're shutting down
            let _ = tx
                .send(DashEvent::SnapshotFetched {
                    seq,
                    source,
                    result,
                })
                .await;
        });

        seq
    }

    pub fn handle_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Clock => {
                let text = clock_text();
                if text != self.clock_text {
                    self.clock_text = text;
                    self.dirty = true;
                }
                self.expire_notifications();
            }
            Trigger::Poll(source) => {
                self.request_snapshot(source);
            }
        }
    }

    /// Start a user command
    ///
    /// Rejected commands (blank username) only push a warning. Accepted ones
    /// run in the background and come back as `DashEvent::ActionSettled`.
    pub fn dispatch(&mut self, command: Command) {
        self.dirty = true;

        let Some(command) = self.actions.begin(command, &mut self.notifications) else {
            return;
        };

        tracing::debug!("Dispatching {:?}", command);
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = ActionDispatcher::perform(&client, command).await;
            let _ = tx.send(DashEvent::ActionSettled(outcome)).await;
        });
    }

    pub fn handle_event(&mut self, event: DashEvent) {
        match event {
            DashEvent::SnapshotFetched {
                seq,
                source,
                result: Ok(snapshot),
            } => {
                self.last_poll_at = Some(Local::now());
                self.apply_snapshot(seq, snapshot);
                tracing::trace!("Snapshot #{} ({:?}) received", seq, source);
            }
            DashEvent::SnapshotFetched {
                seq,
                source,
                result: Err(e),
            } => {
                // The previous snapshot stays on screen; the next tick retries
                self.poll_failures += 1;
                self.dirty = true;
                tracing::warn!(
                    "Snapshot poll #{} ({:?}) failed [{}]: {}",
                    seq,
                    source,
                    e.kind(),
                    e
                );
            }
            DashEvent::ActionSettled(outcome) => {
                let settlement =
                    self.actions
                        .settle(outcome, &mut self.charts, &mut self.notifications);
                self.dirty = true;

                if settlement.refresh {
                    self.request_snapshot(PollSource::Immediate);
                }
            }
        }
    }

    fn apply_snapshot(&mut self, seq: u64, snapshot: Snapshot) {
        let Some(change) = self.state.apply_snapshot(seq, snapshot) else {
            return;
        };

        if change.metrics_changed {
            if let Some(current) = self.state.read() {
                self.charts.update_from_metrics(&current.metrics);
            }
        }
        if change.simulating_changed && !change.first {
            tracing::info!(
                "Simulation {}",
                if self.state.is_simulating() {
                    "running"
                } else {
                    "stopped"
                }
            );
        }

        // Redraw for visible changes or pending chart work
        if !change.is_noop() || self.charts.take_redraw() {
            self.dirty = true;
        }
    }

    /// When the next notification is due to expire
    pub fn next_notification_deadline(&self) -> Option<Instant> {
        self.notifications.next_deadline()
    }

    /// Drop notifications whose lifetime has run out
    pub fn expire_notifications(&mut self) {
        if self.notifications.expire_due() > 0 {
            self.dirty = true;
        }
    }

    pub fn dismiss_latest(&mut self) {
        if self.notifications.dismiss_latest().is_some() {
            self.dirty = true;
        }
    }

    pub fn dismiss_all(&mut self) {
        if self.notifications.expire_all() > 0 {
            self.dirty = true;
        }
    }

    /// Consume the "something visible changed" flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.state.read()
    }

    pub fn is_simulating(&self) -> bool {
        self.state.is_simulating()
    }

    pub fn applied_seq(&self) -> Option<u64> {
        self.state.applied_seq()
    }

    pub fn charts(&self) -> &ChartSeriesManager {
        &self.charts
    }

    pub fn notifications(&self) -> &NotificationQueue<C> {
        &self.notifications
    }

    pub fn membership(&self) -> Option<&MembershipCheck> {
        self.actions.membership()
    }

    pub fn actions(&self) -> &ActionDispatcher {
        &self.actions
    }

    pub fn clock_text(&self) -> &str {
        &self.clock_text
    }

    pub fn poll_failures(&self) -> u64 {
        self.poll_failures
    }

    pub fn last_poll_at(&self) -> Option<DateTime<Local>> {
        self.last_poll_at
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

fn clock_text() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
