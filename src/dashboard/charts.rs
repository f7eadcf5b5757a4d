// Chart series manager
//
// Derives the bounded display windows for the three chart widgets:
// - Users over time (line): last 15 metric points
// - Posts over time (bar): last 10 metric points
// - Algorithm accuracy (3 fixed slots): updated only by the test command
//
// Windows are recomputed from the whole metrics sequence on every snapshot,
// never appended to, so re-applying the same snapshot leaves them unchanged.

use crate::client::{AccuracyReport, MetricPoint};

/// Points kept for the users-over-time line chart
pub const USERS_WINDOW: usize = 15;

/// Points kept for the posts-over-time bar chart
pub const POSTS_WINDOW: usize = 10;

/// Slot labels of the accuracy chart, in display order
pub const ACCURACY_LABELS: [&str; 3] = ["Bloom Filter", "HyperLogLog", "Count-Min Sketch"];

/// Illustrative frequency-sketch accuracy.
///
/// The backend reports no live accuracy signal for the Count-Min Sketch, so
/// its slot stays at this constant until one exists.
pub const SKETCH_ACCURACY_PLACEHOLDER: f64 = 97.0;

/// Accuracy chart contents before the first test run
pub const INITIAL_ACCURACY: [f64; 3] = [99.0, 98.0, SKETCH_ACCURACY_PLACEHOLDER];

/// A bounded, ordered slice of one metric series (oldest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartWindow {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value in the window (0 when empty)
    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Build the window from the tail of `points`. No padding when shorter.
    fn from_points(capacity: usize, points: &[MetricPoint], value: fn(&MetricPoint) -> u64) -> Self {
        let tail = &points[points.len().saturating_sub(capacity)..];
        Self {
            labels: tail.iter().map(|p| p.time_label.clone()).collect(),
            values: tail.iter().map(value).collect(),
        }
    }
}

/// Owns the backing data of the three chart widgets
#[derive(Debug, Clone)]
pub struct ChartSeriesManager {
    users: ChartWindow,
    posts: ChartWindow,
    accuracy: [f64; 3],
    redraw_pending: bool,
}

impl ChartSeriesManager {
    pub fn new() -> Self {
        Self {
            users: ChartWindow::new(USERS_WINDOW),
            posts: ChartWindow::new(POSTS_WINDOW),
            accuracy: INITIAL_ACCURACY,
            redraw_pending: true,
        }
    }

    pub fn users(&self) -> &ChartWindow {
        &self.users
    }

    pub fn posts(&self) -> &ChartWindow {
        &self.posts
    }

    pub fn accuracy(&self) -> [f64; 3] {
        self.accuracy
    }

    /// Replace both time-series windows from a snapshot's metrics sequence
    ///
    /// Returns true if either window changed (and a redraw was requested).
    pub fn update_from_metrics(&mut self, metrics: &[MetricPoint]) -> bool {
        let users = ChartWindow::from_points(USERS_WINDOW, metrics, |p| p.unique_users);
        let posts = ChartWindow::from_points(POSTS_WINDOW, metrics, |p| p.total_posts);

        let changed = users != self.users || posts != self.posts;
        if changed {
            self.users = users;
            self.posts = posts;
            self.redraw_pending = true;
        }
        changed
    }

    /// Push a test result into the accuracy chart
    ///
    /// Slots: `[bloom accuracy, 100 - hll error, sketch placeholder]`.
    pub fn apply_accuracy(&mut self, report: &AccuracyReport) {
        self.accuracy = [
            percent(report.bloom_accuracy),
            percent(100.0 - report.hll_error_pct),
            SKETCH_ACCURACY_PLACEHOLDER,
        ];
        self.redraw_pending = true;
    }

    /// Consume the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }
}

impl Default for ChartSeriesManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp to a finite percentage
fn percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
