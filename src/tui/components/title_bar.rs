// Title bar component
//
// Renders the app name, backend URL, simulation badge and the wall clock.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (badge, badge_color) = if app.dashboard.is_simulating() {
        ("● RUNNING", theme.success)
    } else {
        ("○ STOPPED", theme.muted)
    };

    let line = Line::from(vec![
        Span::styled(
            " ◆ Sketch Dashboard ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("── {} ", app.dashboard.base_url()),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            badge,
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        ),
    ]);

    let title = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(format!(" {} ", app.dashboard.clock_text())).right_aligned()),
    );

    f.render_widget(title, area);
}
