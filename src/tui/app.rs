// Application state for the TUI
//
// Wraps the dashboard core with the view-only state the terminal needs:
// theme, input focus, the username being typed and the logs toggle.
// Key handling translates keystrokes into dashboard commands.

use crate::dashboard::actions::Command;
use crate::dashboard::Dashboard;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// Longest username the input field accepts
const MAX_INPUT_LEN: usize = 64;

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Single-key commands
    Commands,
    /// Typing into the username field
    UserInput,
}

pub struct App {
    pub dashboard: Dashboard,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub focus: Focus,
    pub user_input: String,
    pub show_logs: bool,
    pub should_quit: bool,
    start_time: Instant,
    logs_seen: u64,
    needs_redraw: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, log_buffer: LogBuffer, theme: Theme) -> Self {
        Self {
            dashboard,
            log_buffer,
            theme,
            focus: Focus::Commands,
            user_input: String::new(),
            show_logs: false,
            should_quit: false,
            start_time: Instant::now(),
            logs_seen: 0,
            needs_redraw: true,
        }
    }

    /// Handle one key event. Only presses act; repeats and releases are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.needs_redraw = true;
        match self.focus {
            Focus::UserInput => self.handle_input_key(key),
            Focus::Commands => self.handle_command_key(key),
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('s') => self.dashboard.dispatch(Command::Start),
            KeyCode::Char('x') => self.dashboard.dispatch(Command::Stop),
            KeyCode::Char('r') => self.dashboard.dispatch(Command::Reset),
            KeyCode::Char('t') => self.dashboard.dispatch(Command::TestAlgorithms),
            KeyCode::Char('u') | KeyCode::Char('/') => self.focus = Focus::UserInput,
            KeyCode::Char('d') => self.dashboard.dismiss_latest(),
            KeyCode::Char('D') => self.dashboard.dismiss_all(),
            KeyCode::Char('l') | KeyCode::Char('L') => self.show_logs = !self.show_logs,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let user = std::mem::take(&mut self.user_input);
                self.dashboard.dispatch(Command::CheckUser(user));
            }
            KeyCode::Esc => self.focus = Focus::Commands,
            KeyCode::Backspace => {
                self.user_input.pop();
            }
            KeyCode::Char(c) if self.user_input.chars().count() < MAX_INPUT_LEN => {
                self.user_input.push(c);
            }
            _ => {}
        }
    }

    /// Whether the screen needs repainting; resets the flag
    pub fn take_redraw(&mut self) -> bool {
        let mut redraw = self.dashboard.take_dirty() | std::mem::take(&mut self.needs_redraw);

        if self.show_logs {
            let version = self.log_buffer.version();
            if version != self.logs_seen {
                self.logs_seen = version;
                redraw = true;
            }
        }

        redraw
    }

    /// Force a repaint on the next loop iteration (terminal resize)
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Get uptime as formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubBackend;
    use crate::client::StatsClient;
    use crate::dashboard::actions::{ActionKind, ActionPhase};
    use crate::dashboard::notifications::{Severity, DEFAULT_TTL};
    use crate::events::DashEvent;
    use std::time::Duration;
    use tokio::sync::mpsc;

    async fn app() -> (App, StubBackend, mpsc::Receiver<DashEvent>) {
        let (backend, url) = StubBackend::spawn().await;
        let client = StatsClient::new(url, Duration::from_secs(2)).unwrap();
        let (tx, rx) = mpsc::channel(16);
        let dashboard = Dashboard::new(client, tx, DEFAULT_TTL);
        (
            App::new(dashboard, LogBuffer::new(), Theme::default()),
            backend,
            rx,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn command_keys_dispatch_actions() {
        let (mut app, _backend, mut rx) = app().await;

        app.handle_key(press(KeyCode::Char('s')));
        assert_eq!(
            app.dashboard.actions().phase(ActionKind::Start),
            ActionPhase::InFlight
        );

        let event = rx.recv().await.unwrap();
        app.dashboard.handle_event(event);
        assert_eq!(
            app.dashboard.actions().phase(ActionKind::Start),
            ActionPhase::Idle
        );
        let latest = app.dashboard.notifications().latest().unwrap();
        assert_eq!(latest.message, "Simulation started!");
    }

    #[tokio::test]
    async fn typing_goes_to_input_only_when_focused() {
        let (mut app, _backend, _rx) = app().await;

        // 's' in command mode is a command, not text
        app.handle_key(press(KeyCode::Char('u')));
        assert_eq!(app.focus, Focus::UserInput);

        type_text(&mut app, "sam");
        assert_eq!(app.user_input, "sam");
        assert_eq!(
            app.dashboard.actions().phase(ActionKind::Start),
            ActionPhase::Idle
        );

        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.user_input, "sa");

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Commands);
        assert_eq!(app.user_input, "sa");
    }

    #[tokio::test]
    async fn enter_submits_and_clears_input() {
        let (mut app, backend, mut rx) = app().await;

        app.handle_key(press(KeyCode::Char('/')));
        type_text(&mut app, "alice");
        app.handle_key(press(KeyCode::Enter));
        assert!(app.user_input.is_empty());

        let event = rx.recv().await.unwrap();
        app.dashboard.handle_event(event);
        assert_eq!(app.dashboard.membership().unwrap().user, "alice");
        assert_eq!(backend.hits("/api/check_user"), 1);
    }

    #[tokio::test]
    async fn blank_submit_warns_without_request() {
        let (mut app, backend, _rx) = app().await;

        app.handle_key(press(KeyCode::Char('u')));
        type_text(&mut app, "  ");
        app.handle_key(press(KeyCode::Enter));

        let latest = app.dashboard.notifications().latest().unwrap();
        assert_eq!(latest.severity, Severity::Warning);
        assert_eq!(latest.message, "Please enter a username");
        assert_eq!(backend.hits("/api/check_user"), 0);
    }

    #[tokio::test]
    async fn releases_are_ignored_and_ctrl_c_quits() {
        let (mut app, _backend, _rx) = app().await;

        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(!app.should_quit);

        // Ctrl+C quits even while typing
        app.focus = Focus::UserInput;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn log_growth_redraws_only_when_panel_visible() {
        let (mut app, _backend, _rx) = app().await;
        app.take_redraw();

        app.log_buffer.add(crate::logging::LogEntry {
            timestamp: chrono::Local::now(),
            level: crate::logging::LogLevel::Info,
            target: "sketchdash".to_string(),
            message: "hello".to_string(),
        });
        assert!(!app.take_redraw());

        app.handle_key(press(KeyCode::Char('l')));
        assert!(app.show_logs);
        assert!(app.take_redraw());
        assert!(!app.take_redraw());
    }

    #[tokio::test]
    async fn uptime_starts_at_zero() {
        let (app, _backend, _rx) = app().await;
        assert_eq!(app.uptime(), "00:00:00");
    }
}
