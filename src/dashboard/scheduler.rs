// Poll scheduler
//
// Three independent periodic triggers:
// - Clock tick (1s): refreshes the time-of-day display, no network
// - Baseline poll (2s): always active
// - Accelerated poll (1s): only fires while the simulation is running
//
// The accelerated timer keeps ticking regardless; the simulating flag is
// checked on every tick rather than once at startup, so it turns on and off
// as the backend's flag changes. `Interval::tick` is cancel-safe, so `next`
// can sit inside the UI loop's `tokio::select!` alongside input and results.

use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub clock: Duration,
    pub baseline: Duration,
    pub accelerated: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            clock: Duration::from_millis(1000),
            baseline: Duration::from_millis(2000),
            accelerated: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollSource {
    Baseline,
    Accelerated,
    /// Out-of-cycle poll requested by an action (reset)
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Clock,
    Poll(PollSource),
}

pub struct PollScheduler {
    clock: Interval,
    baseline: Interval,
    accelerated: Interval,
}

impl PollScheduler {
    /// Create the three timers. Must be called from within a tokio runtime.
    ///
    /// All three fire immediately on their first tick.
    pub fn new(intervals: PollIntervals) -> Self {
        Self {
            clock: timer(intervals.clock),
            baseline: timer(intervals.baseline),
            accelerated: timer(intervals.accelerated),
        }
    }

    /// Wait for the next trigger
    ///
    /// `simulating` gates the accelerated poll for ticks observed during this
    /// call; pass the current flag each time.
    pub async fn next(&mut self, simulating: bool) -> Trigger {
        loop {
            tokio::select! {
                biased;

                _ = self.clock.tick() => return Trigger::Clock,
                _ = self.baseline.tick() => return Trigger::Poll(PollSource::Baseline),
                _ = self.accelerated.tick() => {
                    if simulating {
                        return Trigger::Poll(PollSource::Accelerated);
                    }
                }
            }
        }
    }
}

fn timer(period: Duration) -> Interval {
    let mut timer = interval(period);
    // After a stall, resume the cadence instead of firing a burst
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[derive(Debug, Default, PartialEq, Eq)]
    struct Counts {
        clock: usize,
        baseline: usize,
        accelerated: usize,
    }

    /// Drive the scheduler over [0, horizon] of paused time
    async fn run_for(horizon: Duration, simulating: impl Fn(Duration) -> bool) -> Counts {
        let mut scheduler = PollScheduler::new(PollIntervals::default());
        let start = Instant::now();
        let mut counts = Counts::default();

        loop {
            let trigger = scheduler.next(simulating(start.elapsed())).await;
            if start.elapsed() > horizon {
                break;
            }
            match trigger {
                Trigger::Clock => counts.clock += 1,
                Trigger::Poll(PollSource::Baseline) => counts.baseline += 1,
                Trigger::Poll(PollSource::Accelerated) => counts.accelerated += 1,
                Trigger::Poll(PollSource::Immediate) => unreachable!(),
            }
        }
        counts
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_simulation_gets_clock_and_baseline_only() {
        let counts = run_for(Duration::from_secs(4), |_| false).await;
        assert_eq!(
            counts,
            Counts {
                clock: 5,
                baseline: 3,
                accelerated: 0
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn running_simulation_adds_accelerated_poll() {
        let counts = run_for(Duration::from_secs(4), |_| true).await;
        assert_eq!(counts.clock, 5);
        assert_eq!(counts.baseline, 3);
        assert_eq!(counts.accelerated, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn accelerated_poll_follows_flag_changes() {
        let counts = run_for(Duration::from_secs(4), |elapsed| {
            elapsed >= Duration::from_secs(2)
        })
        .await;
        // Ticks at 2s, 3s and 4s observe the flag set
        assert_eq!(counts.accelerated, 3);
        assert_eq!(counts.baseline, 3);
    }

    #[test]
    fn default_periods() {
        let intervals = PollIntervals::default();
        assert_eq!(intervals.clock, Duration::from_secs(1));
        assert_eq!(intervals.baseline, Duration::from_secs(2));
        assert_eq!(intervals.accelerated, Duration::from_secs(1));
    }
}
