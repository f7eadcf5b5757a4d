// UI rendering
//
// Lays out the dashboard and hands each region to its component. Called only
// when the app reports something changed.

use super::app::App;
use super::components::{
    self, AlgorithmsPanel, ChartsPanel, LogsPanel, PostsPanel, Toast, TrendingPanel,
};
use super::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

/// Main render function
pub fn draw(f: &mut Frame, app: &App) {
    // Vertical sections:
    // - Title bar (3 lines)
    // - Charts (40% of the rest)
    // - Lists (trending, posts, algorithms)
    // - Membership check (4 lines)
    // - System logs (optional)
    // - Status bar (3 lines)
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Percentage(40),
        Constraint::Min(6),
        Constraint::Length(4),
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);
    ChartsPanel::render(f, chunks[1], app.dashboard.charts(), &app.theme);
    render_lists(f, chunks[2], app);
    components::render_membership(f, chunks[3], app);

    let status_area = if app.show_logs {
        let height = chunks[4].height.saturating_sub(2) as usize;
        LogsPanel::render(f, chunks[4], &app.log_buffer.recent(height), &app.theme);
        chunks[5]
    } else {
        chunks[4]
    };
    components::render_status(f, status_area, app);

    // Toasts go last so they sit on top of everything
    Toast::render(f, f.area(), app.dashboard.notifications().iter(), &app.theme);
}

/// Trending | Posts | Algorithms, collapsing to two columns when narrow
fn render_lists(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.dashboard.snapshot();
    let trending = snapshot.map(|s| s.trending.as_slice()).unwrap_or(&[]);
    let posts = snapshot
        .map(|s| s.stats.recent_posts.as_slice())
        .unwrap_or(&[]);
    let stats = snapshot.map(|s| &s.stats);

    if Breakpoint::from_width(area.width).list_columns() == 3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(45),
                Constraint::Percentage(25),
            ])
            .split(area);

        TrendingPanel::render(f, cols[0], trending, &app.theme);
        PostsPanel::render(f, cols[1], posts, &app.theme);
        AlgorithmsPanel::render(f, cols[2], stats, &app.theme);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        TrendingPanel::render(f, cols[0], trending, &app.theme);
        PostsPanel::render(f, cols[1], posts, &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubBackend;
    use crate::client::StatsClient;
    use crate::dashboard::notifications::DEFAULT_TTL;
    use crate::dashboard::scheduler::{PollSource, Trigger};
    use crate::dashboard::Dashboard;
    use crate::logging::LogBuffer;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn draws_full_dashboard_after_first_poll() {
        let (_backend, url) = StubBackend::spawn().await;
        let client = StatsClient::new(url, Duration::from_secs(2)).unwrap();
        let (tx, mut rx) = mpsc::channel(16);
        let mut app = App::new(
            Dashboard::new(client, tx, DEFAULT_TTL),
            LogBuffer::new(),
            Theme::default(),
        );

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen(&terminal).contains("No hashtags yet"));

        app.dashboard
            .handle_trigger(Trigger::Poll(PollSource::Baseline));
        let event = rx.recv().await.unwrap();
        app.dashboard.handle_event(event);

        app.show_logs = true;
        terminal.draw(|f| draw(f, &app)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("#Rust"));
        assert!(text.contains("@ivan"));
        assert!(text.contains("Bloom Filter"));
        assert!(text.contains("System Logs"));
        assert!(text.contains("Server 10:00:03"));
    }

    #[tokio::test]
    async fn survives_tiny_terminals() {
        let (_backend, url) = StubBackend::spawn().await;
        let client = StatsClient::new(url, Duration::from_secs(2)).unwrap();
        let (tx, _rx) = mpsc::channel(16);
        let app = App::new(
            Dashboard::new(client, tx, DEFAULT_TTL),
            LogBuffer::new(),
            Theme::default(),
        );

        for (w, h) in [(20, 8), (60, 20), (1, 1)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| draw(f, &app)).unwrap();
        }
    }
}
