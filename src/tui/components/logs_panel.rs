//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, newest at the bottom.
//! Toggled with `l`; hidden by default.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel;

impl LogsPanel {
    pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(" System Logs "),
        );

        f.render_widget(list, area);
    }
}

/// Format a log entry for display
///
/// Events from a submodule are prefixed with its path below the crate root.
fn format_log_entry(entry: &LogEntry) -> String {
    let time = entry.timestamp.format("%H:%M:%S");
    let level = entry.level.as_str();
    match entry.target.strip_prefix("sketchdash::") {
        Some(module) => format!("[{}] {:5} {}: {}", time, level, module, entry.message),
        None => format!("[{}] {:5} {}", time, level, entry.message),
    }
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}
