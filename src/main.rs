// sketchdash - terminal dashboard for a probabilistic-sketch stats backend
//
// Polls a simulator backend for aggregated stats (Bloom filter, HyperLogLog,
// Count-Min Sketch) and renders them live, with commands to start, stop and
// reset the simulation, run the accuracy self-test and check usernames.
//
// Architecture:
// - Client (reqwest): typed calls to the backend's JSON endpoints
// - Dashboard: owns all displayed state; applies fetch results in order
// - Scheduler: clock tick plus baseline/accelerated snapshot polls
// - TUI (ratatui): renders the dashboard and maps keys to commands
// - Event system: spawned fetch tasks report back over an mpsc channel

mod cli;
mod client;
mod config;
mod dashboard;
mod events;
mod logging;
mod startup;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use client::StatsClient;
use config::{Config, LogRotation, LoggingConfig};
use dashboard::notifications::wait_for_deadline;
use dashboard::scheduler::PollScheduler;
use dashboard::Dashboard;
use events::EVENT_BUFFER;
use logging::{LogBuffer, TuiLogLayer};
use theme::Theme;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show, --reset, ...)
    let cli = cli::Cli::parse();
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env().with_overrides(cli.url.clone(), cli.no_tui);

    let log_buffer = LogBuffer::new();

    // In TUI mode logs go to the in-memory buffer (stdout would garble the
    // display); headless mode logs to stdout. File logging is added on top.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("sketchdash={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must live until exit so buffered lines get flushed
    let (file_writer, _file_guard) = match init_file_writer(&config.logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            config
                .enable_tui
                .then(|| TuiLogLayer::new(log_buffer.clone())),
        )
        .with((!config.enable_tui).then(tracing_subscriber::fmt::layer))
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
        }))
        .init();

    // Print startup banner AFTER initialization (shows actual status)
    // Resolved once, after tracing is up, so an unknown name warns once
    let theme = Theme::by_name(&config.theme);
    startup::print_startup(&config, &theme);
    startup::log_startup(&config, &theme);

    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(config, theme, log_buffer).await {
            tracing::error!("TUI error: {:?}", e);
            return Err(e);
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        run_headless(config).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Rolling file writer for the JSON log, if enabled
///
/// A log directory that can't be created only costs the file log; the
/// dashboard still starts.
fn init_file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(appender))
}

/// Headless mode: same scheduler and dashboard, results reported via tracing
///
/// Runs until Ctrl+C. There is no input, so only polling happens; each newly
/// applied snapshot is summarized at info level.
async fn run_headless(config: Config) -> Result<()> {
    let client = StatsClient::new(config.base_url.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    let (event_tx, mut event_rx) = mpsc::channel(EVENT_BUFFER);
    let mut dashboard = Dashboard::new(client, event_tx, config.notifications.ttl());
    let mut scheduler = PollScheduler::new(config.polling.intervals());
    let mut reported_seq = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        dashboard.expire_notifications();
        let simulating = dashboard.is_simulating();
        let expiry = dashboard.next_notification_deadline();

        tokio::select! {
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl+C")?;
                tracing::info!("Shutting down...");
                break;
            }

            trigger = scheduler.next(simulating) => {
                dashboard.handle_trigger(trigger);
            }

            Some(event) = event_rx.recv() => {
                dashboard.handle_event(event);
                if dashboard.applied_seq() != reported_seq {
                    reported_seq = dashboard.applied_seq();
                    report_snapshot(&dashboard);
                }
            }

            _ = wait_for_deadline(expiry) => {}
        }
    }

    Ok(())
}

fn report_snapshot(dashboard: &Dashboard) {
    let Some(snapshot) = dashboard.snapshot() else {
        return;
    };

    let top = snapshot
        .trending
        .first()
        .map(|t| format!("{} ({})", t.label, t.count))
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        seq = ?dashboard.applied_seq(),
        simulating = snapshot.simulating,
        "Snapshot: {} posts, {} metric points, top hashtag {}, {} poll failures",
        snapshot.stats.post_count,
        snapshot.metrics.len(),
        top,
        dashboard.poll_failures()
    );
}
