// Membership check panel
//
// Username input on the first line, the last check's verdict below it.

use crate::dashboard::actions::{ActionKind, ActionPhase, MembershipCheck, MembershipVerdict};
use crate::theme::Theme;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::UserInput;

    let input_line = if focused {
        Line::from(vec![
            Span::styled("User › ", Style::default().fg(theme.highlight)),
            Span::styled(app.user_input.as_str(), Style::default().fg(theme.foreground)),
            Span::styled("▏", Style::default().fg(theme.highlight)),
        ])
    } else if app.user_input.is_empty() {
        Line::styled("press u to check a username", Style::default().fg(theme.muted))
    } else {
        Line::from(vec![
            Span::styled("User › ", Style::default().fg(theme.muted)),
            Span::styled(app.user_input.as_str(), Style::default().fg(theme.muted)),
        ])
    };

    let checking = app.dashboard.actions().phase(ActionKind::CheckUser) == ActionPhase::InFlight;
    let result_line = match (checking, app.dashboard.membership()) {
        (true, _) => Line::styled("Checking…", Style::default().fg(theme.muted)),
        (false, Some(check)) => result_line(check, theme),
        (false, None) => Line::default(),
    };

    let border = if focused { theme.highlight } else { theme.border };
    let panel = Paragraph::new(vec![input_line, result_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Bloom Filter Membership "),
    );

    f.render_widget(panel, area);
}

fn result_line(check: &MembershipCheck, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            check.headline(),
            Style::default()
                .fg(verdict_color(check.verdict, theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  │  {}", check.exact_line()),
            Style::default().fg(theme.muted),
        ),
    ])
}

fn verdict_color(verdict: MembershipVerdict, theme: &Theme) -> Color {
    match verdict {
        MembershipVerdict::NotFound => theme.info,
        MembershipVerdict::Found => theme.success,
        MembershipVerdict::FalsePositive => theme.warning,
    }
}
