//! Toast stack component
//!
//! Draws the live notifications as an overlay in the bottom-right corner,
//! newest at the bottom, each bordered in its severity color. Expiry is the
//! notification queue's job; this only draws what is currently live.

use crate::dashboard::notifications::Notification;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Most toasts shown at once; older live ones wait off-screen
const MAX_VISIBLE: usize = 4;
const TOAST_HEIGHT: u16 = 3;

pub struct Toast;

impl Toast {
    /// Render `notifications` (oldest first) stacked upward from the corner
    pub fn render<'a>(
        f: &mut Frame,
        area: Rect,
        notifications: impl DoubleEndedIterator<Item = &'a Notification>,
        theme: &Theme,
    ) {
        for (slot, notification) in notifications.rev().take(MAX_VISIBLE).enumerate() {
            let Some(rect) = toast_rect(area, &notification.message, slot as u16) else {
                break;
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.severity(notification.severity)))
                .title(toast_title(notification))
                .style(Style::default().bg(theme.background));

            let text = Paragraph::new(notification.message.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.foreground))
                .block(block);

            // Clear the area first so the toast sits on top
            f.render_widget(Clear, rect);
            f.render_widget(text, rect);
        }
    }
}

/// Severity plus the time the notification was raised
fn toast_title(notification: &Notification) -> String {
    format!(
        " {} · {} ",
        notification.severity.as_str(),
        notification.created_at.format("%H:%M:%S")
    )
}

/// Where toast number `slot` (0 = bottom) goes, or None if it doesn't fit
fn toast_rect(area: Rect, message: &str, slot: u16) -> Option<Rect> {
    // Two columns of padding each side plus the border
    let width = (message.width() as u16)
        .saturating_add(4)
        .min(area.width.saturating_sub(4));

    // Keep a two-cell margin from the bottom edge
    let offset = TOAST_HEIGHT * (slot + 1) + 2;
    if width < 5 || offset > area.height {
        return None;
    }

    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom() - offset;
    Some(Rect::new(x, y, width, TOAST_HEIGHT))
}
