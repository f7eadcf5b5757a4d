// Recent posts panel
//
// One two-line block per post: who/where/when on top, text and hashtag below.
// Text is shown verbatim.

use crate::client::PostView;
use crate::dashboard::lists::{ListFragment, ListRenderer, PostBlock};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub struct PostsPanel;

impl PostsPanel {
    pub fn render(frame: &mut Frame, area: Rect, posts: &[PostView], theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Recent Posts ");

        let blocks = match ListRenderer::recent_posts(posts) {
            ListFragment::Placeholder(text) => {
                let placeholder = Paragraph::new(text)
                    .style(Style::default().fg(theme.muted))
                    .block(block);
                frame.render_widget(placeholder, area);
                return;
            }
            ListFragment::Rows(blocks) => blocks,
        };

        let items: Vec<ListItem> = blocks
            .iter()
            .map(|post| ListItem::new(post_text(post, theme)))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn post_text<'a>(post: &PostBlock<'a>, theme: &Theme) -> Text<'a> {
    let header = Line::from(vec![
        Span::styled(
            format!("@{}", post.user),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {} · {}", post.platform, post.timestamp),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            format!("  ♥ {}", post.likes),
            Style::default().fg(theme.error),
        ),
    ]);
    let body = Line::from(vec![
        Span::raw("  "),
        Span::styled(post.text, Style::default().fg(theme.foreground)),
        Span::raw(" "),
        Span::styled(post.hashtag, Style::default().fg(theme.highlight)),
    ]);

    Text::from(vec![header, body])
}
