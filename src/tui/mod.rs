// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard input, scheduler triggers, fetch results)
// - Rendering the UI when something changed

pub mod app;
pub mod components;
pub mod layout;
pub mod ui;

use crate::client::StatsClient;
use crate::config::Config;
use crate::dashboard::notifications::wait_for_deadline;
use crate::dashboard::scheduler::PollScheduler;
use crate::dashboard::Dashboard;
use crate::events::EVENT_BUFFER;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the input thread waits for a key before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, theme: Theme, log_buffer: LogBuffer) -> Result<()> {
    let client = StatsClient::new(config.base_url.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_BUFFER);
    let dashboard = Dashboard::new(client, event_tx, config.notifications.ttl());
    let mut app = App::new(dashboard, log_buffer, theme);
    let mut scheduler = PollScheduler::new(config.polling.intervals());

    let result = run_event_loop(&mut terminal, &mut app, &mut scheduler, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Forward terminal input from a blocking thread
///
/// crossterm's reader blocks, so it lives on its own thread and feeds the
/// async loop through a channel. The thread exits once the receiver is gone.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Terminal poll failed: {}", e);
                break;
            }
        }
    });
    rx
}

/// Main event loop
///
/// Waits on four sources and handles whichever is ready first:
/// 1. Keyboard input and resizes
/// 2. Scheduler triggers (clock tick, snapshot polls)
/// 3. Results of spawned fetches and commands
/// 4. The next notification deadline
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    scheduler: &mut PollScheduler,
    event_rx: &mut mpsc::Receiver<crate::events::DashEvent>,
) -> Result<()> {
    let mut input_rx = spawn_input_reader();

    loop {
        app.dashboard.expire_notifications();
        if app.take_redraw() {
            terminal
                .draw(|f| ui::draw(f, app))
                .context("Failed to draw terminal")?;
        }

        let simulating = app.dashboard.is_simulating();
        let expiry = app.dashboard.next_notification_deadline();
        tokio::select! {
            input = input_rx.recv() => match input {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(Event::Resize(_, _)) => app.request_redraw(),
                Some(_) => {}
                None => anyhow::bail!("Terminal input closed"),
            },

            trigger = scheduler.next(simulating) => {
                app.dashboard.handle_trigger(trigger);
            }

            Some(event) = event_rx.recv() => {
                app.dashboard.handle_event(event);
            }

            // Expiry itself happens at the top of the loop
            _ = wait_for_deadline(expiry) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
