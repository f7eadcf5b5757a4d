// Startup module - banner and module status
//
// Printed to stdout before the TUI takes over the screen (or at the top of
// headless output), and mirrored into the log so the System Logs panel shows
// the same boot sequence.

use crate::config::{Config, VERSION};
use crate::theme::Theme;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// Print the startup banner and module status
pub fn print_startup(config: &Config, theme: &Theme) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}sketchdash{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Live dashboard for probabilistic sketches{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Loading modules...{RESET}");
    for module in &get_module_status(config, theme) {
        print_module_status(module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Backend {BOLD}{}{RESET}",
        config.base_url
    );
    println!();
}

/// Status of each module for this run
fn get_module_status(config: &Config, theme: &Theme) -> Vec<ModuleStatus> {
    let polling = &config.polling;
    let logging = &config.logging;

    vec![
        ModuleStatus {
            name: "client",
            enabled: true,
            description: format!("{}ms request timeout", config.request_timeout.as_millis()),
        },
        ModuleStatus {
            name: "poller",
            enabled: true,
            description: format!(
                "every {}ms, {}ms while simulating",
                polling.baseline_ms, polling.accelerated_ms
            ),
        },
        ModuleStatus {
            name: "tui",
            enabled: config.enable_tui,
            description: format!("Terminal interface ({} theme)", theme.name),
        },
        ModuleStatus {
            name: "file-log",
            enabled: logging.file_enabled,
            description: logging
                .file_dir
                .join(format!("{}.*", logging.file_prefix))
                .display()
                .to_string(),
        },
    ]
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Log the same boot sequence through tracing
pub fn log_startup(config: &Config, theme: &Theme) {
    tracing::info!("══════════════════════════════");
    tracing::info!("  sketchdash v{}", VERSION);
    tracing::info!("══════════════════════════════");

    for module in &get_module_status(config, theme) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("▸ Backend {}", config.base_url);
}
