//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    ///
    /// `enable_tui` is a runtime flag and is not persisted.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# sketchdash configuration

# Stats backend base URL (SKETCHDASH_URL / --url override this)
base_url = "{base_url}"

# Per-request timeout for backend calls
request_timeout_ms = {timeout_ms}

# Theme: auto, dark, light, dracula, nord, basic
theme = "{theme}"

# Timer periods in milliseconds
[polling]
clock_ms = {clock_ms}
baseline_ms = {baseline_ms}
# Only fires while the simulation is running
accelerated_ms = {accelerated_ms}

[notifications]
ttl_ms = {ttl_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            base_url = self.base_url,
            timeout_ms = self.request_timeout.as_millis(),
            theme = self.theme,
            clock_ms = self.polling.clock_ms,
            baseline_ms = self.polling.baseline_ms,
            accelerated_ms = self.polling.accelerated_ms,
            ttl_ms = self.notifications.ttl_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
