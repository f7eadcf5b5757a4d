// Status bar component
//
// Two lines at the bottom: snapshot freshness on top, key hints below.

use super::formatters::format_number;
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const COMMAND_HINTS: &str =
    " s:start  x:stop  r:reset  t:test  u:check user  d/D:dismiss  l:logs  q:quit";
const COMMAND_HINTS_SHORT: &str = " s x r t u d l q";
const INPUT_HINTS: &str = " type a username  Enter:check  Esc:back";

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: labelled fields
/// - Narrow: compact fields, short hints
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.dashboard;
    let bp = Breakpoint::from_width(area.width);

    let badge = if dashboard.is_simulating() {
        "● Running"
    } else {
        "○ Stopped"
    };
    let posts = dashboard
        .snapshot()
        .map(|s| format_number(s.stats.post_count))
        .unwrap_or_else(|| "-".to_string());
    let server_time = dashboard
        .snapshot()
        .and_then(|s| s.server_time.as_deref())
        .unwrap_or("--:--:--");
    let last_poll = dashboard
        .last_poll_at()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let seq = dashboard
        .applied_seq()
        .map(|s| format!("#{}", s))
        .unwrap_or_else(|| "-".to_string());

    let stats_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ Posts {} │ Server {} │ Last poll {} │ Poll failures {} │ Snapshot {} │ Up {}",
            badge,
            posts,
            server_time,
            last_poll,
            dashboard.poll_failures(),
            seq,
            app.uptime()
        )
    } else {
        format!(
            " {} │ {} posts │ {} │ ✗{} │ {}",
            badge,
            posts,
            last_poll,
            dashboard.poll_failures(),
            seq
        )
    };

    let hints = match (app.focus, bp.at_least(Breakpoint::Normal)) {
        (Focus::UserInput, _) => INPUT_HINTS,
        (Focus::Commands, true) => COMMAND_HINTS,
        (Focus::Commands, false) => COMMAND_HINTS_SHORT,
    };

    let failure_style = if dashboard.poll_failures() > 0 {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.status_bar)
    };

    let status = Paragraph::new(vec![
        Line::from(Span::styled(stats_text, failure_style)),
        Line::from(Span::styled(hints, Style::default().fg(app.theme.muted))),
    ])
    .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
