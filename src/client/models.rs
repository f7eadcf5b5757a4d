// Wire models for the stats backend
//
// These types are the canonical records the rest of the dashboard works with.
// serde decodes them straight from the backend JSON; field renames map the
// backend's snake_case names onto ours. Required fields that are missing (or
// negative where we expect counts) fail the whole decode. The three algorithm
// sub-blocks are the exception: absent or malformed, they decode to `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// One aggregated stats snapshot, received atomically per poll
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "is_simulating")]
    pub simulating: bool,
    pub stats: StatsBlock,
    /// Oldest first; never reordered client-side
    pub metrics: Vec<MetricPoint>,
    /// Pre-sorted descending by count at the source
    pub trending: Vec<RankedCount>,
    /// Server wall-clock time of the snapshot (HH:MM:SS), when provided
    #[serde(rename = "timestamp", default)]
    pub server_time: Option<String>,
}

/// A single point of the metrics history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetricPoint {
    #[serde(rename = "time")]
    pub time_label: String,
    pub unique_users: u64,
    pub total_posts: u64,
    #[serde(default)]
    pub online_users: Option<u64>,
}

/// Per-algorithm statistics plus the most recent posts
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsBlock {
    #[serde(rename = "posts_count")]
    pub post_count: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub bloom: Option<BloomStats>,
    #[serde(default, deserialize_with = "lenient")]
    pub hll: Option<HllStats>,
    #[serde(default, deserialize_with = "lenient")]
    pub cms: Option<CmsStats>,
    pub recent_posts: Vec<PostView>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BloomStats {
    pub capacity: u64,
    pub count: u64,
    pub memory_kb: f64,
    /// Fill ratio in [0, 1]
    pub load: f64,
    /// Bit array length
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub hash_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HllStats {
    pub estimate: u64,
    pub registers: u64,
    pub memory_kb: f64,
    #[serde(default)]
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CmsStats {
    pub total_count: u64,
    pub memory_kb: f64,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub depth: Option<u64>,
}

/// A labelled count from a ranked list (trending hashtags)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankedCount {
    #[serde(rename = "item")]
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostView {
    #[serde(default)]
    pub id: Option<u64>,
    pub user: String,
    pub platform: String,
    pub text: String,
    pub hashtag: String,
    pub timestamp: String,
    pub likes: u64,
}

/// Result of the backend's accuracy self-test
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccuracyReport {
    /// Percentage, 0-100
    pub bloom_accuracy: f64,
    /// Relative cardinality error as a percentage, 0-100
    #[serde(rename = "hll_error")]
    pub hll_error_pct: f64,
    #[serde(default)]
    pub hll_estimate: Option<u64>,
    #[serde(default)]
    pub hll_actual: Option<u64>,
}

/// Membership check answer for one username
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserCheck {
    pub user: String,
    pub bloom_result: bool,
    pub is_false_positive: bool,
    pub exact_result: bool,
}

/// Optional acknowledgement body of start/stop/reset
///
/// Only used for logging; any 2xx counts as success even if the body is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommandAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode an optional sub-block, treating a malformed value as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("Dropping malformed stats sub-block: {}", e);
            None
        }
    }))
}
