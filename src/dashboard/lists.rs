// List renderer
//
// Pure mapping from list data to display fragments. Every call produces a
// complete replacement for its panel; nothing is patched incrementally.
// The TUI components turn these fragments into ratatui lines.

use crate::client::{PostView, RankedCount, StatsBlock};

pub const NO_HASHTAGS: &str = "No hashtags yet";
pub const NO_POSTS: &str = "No posts yet";

/// Either the designated empty-state text or the rows to show
#[derive(Debug, Clone, PartialEq)]
pub enum ListFragment<T> {
    Placeholder(&'static str),
    Rows(Vec<T>),
}

#[cfg(test)]
impl<T> ListFragment<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// One ranked trending row
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingRow {
    /// 1-based, in source order
    pub rank: usize,
    pub label: String,
    pub count: u64,
    /// Bar width as a percentage of the first row's count, in [0, 100]
    pub bar_pct: f64,
}

/// One recent post, fields shown verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBlock<'a> {
    pub user: &'a str,
    pub platform: &'a str,
    pub text: &'a str,
    pub hashtag: &'a str,
    pub timestamp: &'a str,
    pub likes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Bloom,
    Hll,
    Cms,
}

impl AlgorithmKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Bloom => "Bloom Filter",
            Self::Hll => "HyperLogLog",
            Self::Cms => "Count-Min Sketch",
        }
    }
}

/// A label/value pair inside an algorithm section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

impl StatLine {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmSection {
    pub kind: AlgorithmKind,
    pub lines: Vec<StatLine>,
}

/// Stateless list-to-fragment mapping
pub struct ListRenderer;

impl ListRenderer {
    /// Ranked trending rows with bars normalized against the first row
    pub fn trending(list: &[RankedCount]) -> ListFragment<TrendingRow> {
        let Some(first) = list.first() else {
            return ListFragment::Placeholder(NO_HASHTAGS);
        };

        let rows = list
            .iter()
            .enumerate()
            .map(|(index, item)| TrendingRow {
                rank: index + 1,
                label: item.label.clone(),
                count: item.count,
                bar_pct: bar_width(item.count, first.count),
            })
            .collect();

        ListFragment::Rows(rows)
    }

    /// One block per post, newest ordering left as the backend sent it
    pub fn recent_posts(posts: &[PostView]) -> ListFragment<PostBlock<'_>> {
        if posts.is_empty() {
            return ListFragment::Placeholder(NO_POSTS);
        }

        ListFragment::Rows(
            posts
                .iter()
                .map(|post| PostBlock {
                    user: &post.user,
                    platform: &post.platform,
                    text: &post.text,
                    hashtag: &post.hashtag,
                    timestamp: &post.timestamp,
                    likes: post.likes,
                })
                .collect(),
        )
    }

    /// One section per present sub-block; absent sub-blocks are omitted
    pub fn algorithm_stats(stats: &StatsBlock) -> Vec<AlgorithmSection> {
        let mut sections = Vec::with_capacity(3);

        if let Some(bloom) = &stats.bloom {
            let mut lines = vec![
                StatLine::new("Capacity", bloom.capacity),
                StatLine::new("Items", bloom.count),
                StatLine::new("Memory", format!("{:.2} KB", bloom.memory_kb)),
                StatLine::new("Load", format!("{:.1}%", bloom.load * 100.0)),
            ];
            if let Some(size) = bloom.size {
                lines.push(StatLine::new("Bits", size));
            }
            if let Some(hashes) = bloom.hash_count {
                lines.push(StatLine::new("Hashes", hashes));
            }
            sections.push(AlgorithmSection {
                kind: AlgorithmKind::Bloom,
                lines,
            });
        }

        if let Some(hll) = &stats.hll {
            let mut lines = vec![
                StatLine::new("Estimate", hll.estimate),
                StatLine::new("Registers", hll.registers),
                StatLine::new("Memory", format!("{:.2} KB", hll.memory_kb)),
            ];
            if let Some(precision) = hll.precision {
                lines.push(StatLine::new("Precision", precision));
            }
            sections.push(AlgorithmSection {
                kind: AlgorithmKind::Hll,
                lines,
            });
        }

        if let Some(cms) = &stats.cms {
            let mut lines = vec![
                StatLine::new("Total items", cms.total_count),
                StatLine::new("Memory", format!("{:.2} KB", cms.memory_kb)),
            ];
            if let (Some(width), Some(depth)) = (cms.width, cms.depth) {
                lines.push(StatLine::new("Table", format!("{} x {}", width, depth)));
            }
            sections.push(AlgorithmSection {
                kind: AlgorithmKind::Cms,
                lines,
            });
        }

        sections
    }
}

/// Percentage of `top` that `count` represents, clamped to [0, 100]
///
/// A zero `top` is treated as 1 so the result stays finite.
pub fn bar_width(count: u64, top: u64) -> f64 {
    let denominator = top.max(1) as f64;
    ((count as f64 / denominator) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{BloomStats, HllStats};

    fn ranked(items: &[(&str, u64)]) -> Vec<RankedCount> {
        items
            .iter()
            .map(|(label, count)| RankedCount {
                label: label.to_string(),
                count: *count,
            })
            .collect()
    }

    fn stats_block() -> StatsBlock {
        StatsBlock {
            post_count: 2,
            bloom: Some(BloomStats {
                capacity: 5000,
                count: 2,
                memory_kb: 5.849,
                load: 0.0004,
                size: None,
                hash_count: None,
            }),
            hll: Some(HllStats {
                estimate: 2,
                registers: 1024,
                memory_kb: 1.0,
                precision: Some(10),
            }),
            cms: None,
            recent_posts: Vec::new(),
        }
    }

    #[test]
    fn empty_lists_render_placeholders() {
        assert_eq!(ListRenderer::trending(&[]), ListFragment::Placeholder(NO_HASHTAGS));
        assert_eq!(ListRenderer::recent_posts(&[]), ListFragment::Placeholder(NO_POSTS));
    }

    #[test]
    fn trending_rows_are_ranked_in_source_order() {
        let fragment = ListRenderer::trending(&ranked(&[("#Rust", 8), ("#Go", 4), ("#C", 2)]));
        let rows = fragment.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[2].rank, 3);
        assert_eq!(rows[1].label, "#Go");
        assert_eq!(rows[0].bar_pct, 100.0);
        assert_eq!(rows[1].bar_pct, 50.0);
        assert_eq!(rows[2].bar_pct, 25.0);
    }

    #[test]
    fn bar_width_stays_in_range_for_zero_top() {
        let fragment = ListRenderer::trending(&ranked(&[("#a", 0), ("#b", 0)]));
        for row in fragment.rows() {
            assert!(row.bar_pct.is_finite());
            assert_eq!(row.bar_pct, 0.0);
        }
    }

    #[test]
    fn bar_width_bounds_hold_for_all_inputs() {
        let samples = [0, 1, 2, 7, 100, 10_000, u64::MAX];
        for &count in &samples {
            for &top in &samples {
                let width = bar_width(count, top);
                assert!(width.is_finite());
                assert!((0.0..=100.0).contains(&width), "{count}/{top} -> {width}");
            }
        }
    }

    #[test]
    fn unsorted_input_still_clamps_at_full_width() {
        // Source order is trusted; a later larger count just saturates
        let fragment = ListRenderer::trending(&ranked(&[("#a", 2), ("#b", 10)]));
        assert_eq!(fragment.rows()[1].bar_pct, 100.0);
    }

    #[test]
    fn posts_are_shown_verbatim() {
        let posts = vec![PostView {
            id: Some(1),
            user: "anna".to_string(),
            platform: "Mastodon".to_string(),
            text: "<b>not escaped</b>".to_string(),
            hashtag: "#Rust".to_string(),
            timestamp: "12:01:02".to_string(),
            likes: 7,
        }];

        let fragment = ListRenderer::recent_posts(&posts);
        let block = &fragment.rows()[0];
        assert_eq!(block.text, "<b>not escaped</b>");
        assert_eq!(block.likes, 7);
    }

    #[test]
    fn missing_cms_omits_its_section() {
        let sections = ListRenderer::algorithm_stats(&stats_block());
        let kinds: Vec<_> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![AlgorithmKind::Bloom, AlgorithmKind::Hll]);
    }

    #[test]
    fn bloom_section_formats_memory_and_load() {
        let sections = ListRenderer::algorithm_stats(&stats_block());
        let bloom = &sections[0].lines;
        assert_eq!(bloom[2].value, "5.85 KB");
        assert_eq!(bloom[3].value, "0.0%");

        let hll = &sections[1].lines;
        assert_eq!(hll.last().unwrap().label, "Precision");
    }

    #[test]
    fn no_sub_blocks_means_no_sections() {
        let mut stats = stats_block();
        stats.bloom = None;
        stats.hll = None;
        assert!(ListRenderer::algorithm_stats(&stats).is_empty());
    }
}
