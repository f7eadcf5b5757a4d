// Algorithm statistics panel
//
// One titled section per sketch the backend reported. Sections for absent
// sub-blocks are simply left out.

use crate::client::StatsBlock;
use crate::dashboard::lists::ListRenderer;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const NO_SNAPSHOT: &str = "Waiting for first snapshot…";
const NO_ALGORITHMS: &str = "No algorithm stats reported";

pub struct AlgorithmsPanel;

impl AlgorithmsPanel {
    pub fn render(frame: &mut Frame, area: Rect, stats: Option<&StatsBlock>, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Algorithms ");

        let lines = match stats {
            None => vec![Line::styled(NO_SNAPSHOT, Style::default().fg(theme.muted))],
            Some(stats) => section_lines(stats, theme),
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn section_lines(stats: &StatsBlock, theme: &Theme) -> Vec<Line<'static>> {
    let sections = ListRenderer::algorithm_stats(stats);
    if sections.is_empty() {
        return vec![Line::styled(NO_ALGORITHMS, Style::default().fg(theme.muted))];
    }

    let mut lines = Vec::new();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(
            section.kind.title(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ));
        for stat in section.lines {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", stat.label), Style::default().fg(theme.muted)),
                Span::styled(stat.value, Style::default().fg(theme.foreground)),
            ]));
        }
    }
    lines
}
