// Trending hashtags panel
//
// Rank, label, count badge and a bar scaled against the top entry.

use super::formatters::{format_compact_number, pad_to_width};
use crate::client::RankedCount;
use crate::dashboard::lists::{ListFragment, ListRenderer, TrendingRow};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Columns reserved for the hashtag label
const LABEL_WIDTH: usize = 16;

pub struct TrendingPanel;

impl TrendingPanel {
    pub fn render(frame: &mut Frame, area: Rect, trending: &[RankedCount], theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Trending Hashtags ");

        let rows = match ListRenderer::trending(trending) {
            ListFragment::Placeholder(text) => {
                let placeholder = Paragraph::new(text)
                    .style(Style::default().fg(theme.muted))
                    .block(block);
                frame.render_widget(placeholder, area);
                return;
            }
            ListFragment::Rows(rows) => rows,
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| ListItem::new(row_line(row, inner_width, theme)))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn row_line(row: &TrendingRow, width: usize, theme: &Theme) -> Line<'static> {
    let rank = format!("{:>2}. ", row.rank);
    let count = format!(" {:>6} ", format_compact_number(row.count));
    let bar_space = width.saturating_sub(rank.len() + LABEL_WIDTH + count.len());
    let bar = "█".repeat(bar_cells(row.bar_pct, bar_space));

    Line::from(vec![
        Span::styled(rank, Style::default().fg(theme.muted)),
        Span::styled(
            pad_to_width(&row.label, LABEL_WIDTH),
            Style::default().fg(theme.foreground),
        ),
        Span::styled(
            count,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(bar, Style::default().fg(theme.chart_posts)),
    ])
}

/// Bar length in cells for a percentage of the available space
fn bar_cells(pct: f64, space: usize) -> usize {
    ((pct / 100.0) * space as f64).round().clamp(0.0, space as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn bar_cells_scale_with_percentage() {
        assert_eq!(bar_cells(100.0, 20), 20);
        assert_eq!(bar_cells(50.0, 20), 10);
        assert_eq!(bar_cells(0.0, 20), 0);
        assert_eq!(bar_cells(100.0, 0), 0);
    }

    #[test]
    fn renders_rows_and_placeholder() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();

        terminal
            .draw(|f| TrendingPanel::render(f, f.area(), &[], &theme))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No hashtags yet"));

        let trending = vec![
            RankedCount {
                label: "#Rust".to_string(),
                count: 1200,
            },
            RankedCount {
                label: "#Go".to_string(),
                count: 600,
            },
        ];
        terminal
            .draw(|f| TrendingPanel::render(f, f.area(), &trending, &theme))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(" 1. #Rust"));
        assert!(text.contains("1.2K"));
        assert!(text.contains(" 2. #Go"));
    }
}
