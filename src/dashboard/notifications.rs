//! Transient notification queue
//!
//! Command results and errors land here as short-lived messages. Each
//! notification carries its own deadline (creation + TTL). The UI loop wakes
//! at [`NotificationQueue::next_deadline`] through [`wait_for_deadline`] and
//! calls [`NotificationQueue::expire_due`] to drop the ones whose deadline
//! has passed. Dismissing removes the entry, which also cancels its
//! pending expiry.
//!
//! Time comes from an injected [`Clock`] so tests can move time by hand
//! instead of sleeping.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Default lifetime of a notification
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Wall-clock creation time, for display
    pub created_at: DateTime<Local>,
    deadline: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Stack of live notifications, oldest first
pub struct NotificationQueue<C: Clock = SystemClock> {
    clock: C,
    ttl: Duration,
    items: Vec<Notification>,
    next_id: NotificationId,
}

impl NotificationQueue<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> NotificationQueue<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            clock,
            ttl,
            items: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a notification and schedule its removal after the TTL
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        match severity {
            Severity::Error => tracing::error!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Info | Severity::Success => tracing::info!("{}", message),
        }

        self.items.push(Notification {
            id,
            message,
            severity,
            created_at: Local::now(),
            deadline: self.clock.now() + self.ttl,
        });
        id
    }

    /// Remove a notification before its TTL runs out
    ///
    /// Returns false if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Dismiss the most recently pushed notification, if any
    pub fn dismiss_latest(&mut self) -> Option<NotificationId> {
        let id = self.items.last()?.id;
        self.dismiss(id);
        Some(id)
    }

    /// Drop every notification whose deadline has passed; returns how many
    pub fn expire_due(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired_at(now));
        before - self.items.len()
    }

    /// Drop everything immediately; returns how many were removed
    pub fn expire_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    /// Earliest deadline among live notifications
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|n| n.deadline).min()
    }
}

#[cfg(test)]
impl<C: Clock> NotificationQueue<C> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}

/// Resolve at `deadline`, or never when there is none
///
/// Sits in the UI loop's `select!` so a notification leaves on time even when
/// nothing else wakes the loop.
pub async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Hand-driven clock shared between the test and the queue
    #[derive(Clone)]
    pub(crate) struct ManualClock(Rc<Cell<Instant>>);

    impl ManualClock {
        pub(crate) fn new() -> Self {
            Self(Rc::new(Cell::new(Instant::now())))
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }

    /// Clock that follows tokio's (pausable) time
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct TokioClock;

    impl Clock for TokioClock {
        fn now(&self) -> Instant {
            tokio::time::Instant::now().into_std()
        }
    }

    fn queue() -> (NotificationQueue<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (NotificationQueue::with_clock(DEFAULT_TTL, clock.clone()), clock)
    }

    #[test]
    fn notifications_expire_after_ttl() {
        let (mut queue, clock) = queue();
        queue.push("Simulation started!", Severity::Success);

        clock.advance(Duration::from_millis(2999));
        assert_eq!(queue.expire_due(), 0);
        assert_eq!(queue.len(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(queue.expire_due(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn each_notification_has_its_own_timer() {
        let (mut queue, clock) = queue();
        queue.push("first", Severity::Info);
        clock.advance(Duration::from_millis(2000));
        queue.push("second", Severity::Warning);

        clock.advance(Duration::from_millis(1000));
        queue.expire_due();

        let remaining: Vec<_> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(remaining, vec!["second"]);

        clock.advance(Duration::from_millis(2000));
        queue.expire_due();
        assert!(queue.is_empty());
    }

    #[test]
    fn dismiss_removes_only_that_notification() {
        let (mut queue, clock) = queue();
        let a = queue.push("a", Severity::Info);
        let b = queue.push("b", Severity::Error);

        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.latest().map(|n| n.id), Some(b));

        // The dismissed one is not resurrected or double-counted on expiry
        clock.advance(DEFAULT_TTL);
        assert_eq!(queue.expire_due(), 1);
    }

    #[test]
    fn next_deadline_is_the_earliest_live_one() {
        let (mut queue, clock) = queue();
        assert_eq!(queue.next_deadline(), None);

        let start = clock.now();
        let first = queue.push("first", Severity::Info);
        clock.advance(Duration::from_millis(500));
        queue.push("second", Severity::Info);
        assert_eq!(queue.next_deadline(), Some(start + DEFAULT_TTL));

        queue.dismiss(first);
        assert_eq!(
            queue.next_deadline(),
            Some(start + Duration::from_millis(500) + DEFAULT_TTL)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_deadline_sleeps_until_the_instant() {
        let start = tokio::time::Instant::now();
        wait_for_deadline(Some(TokioClock.now() + Duration::from_millis(1500))).await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(1500));
        assert!(waited < Duration::from_millis(1501));
    }

    #[test]
    fn stacking_preserves_insertion_order() {
        let (mut queue, _clock) = queue();
        for i in 0..5 {
            queue.push(format!("n{}", i), Severity::Info);
        }
        let ids: Vec<_> = queue.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn dismiss_latest_and_expire_all() {
        let (mut queue, _clock) = queue();
        assert_eq!(queue.dismiss_latest(), None);

        queue.push("a", Severity::Info);
        let b = queue.push("b", Severity::Info);
        queue.push("c", Severity::Info);

        assert_eq!(queue.dismiss_latest(), Some(2));
        assert_eq!(queue.latest().map(|n| n.id), Some(b));
        assert_eq!(queue.expire_all(), 2);
        assert!(queue.is_empty());
    }
}
