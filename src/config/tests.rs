//! Configuration tests
//!
//! `to_toml` and `FileConfig` must stay in sync: every persisted field written
//! by one has to be read back by the other.

use super::*;
use crate::dashboard::notifications::DEFAULT_TTL;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.base_url = "http://stats.local:8000".to_string();
    config.request_timeout = Duration::from_millis(750);
    config.theme = "nord".to_string();
    config.polling.baseline_ms = 5000;
    config.notifications.ttl_ms = 1500;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let reloaded = Config::from_sources(file, no_env);

    assert_eq!(reloaded.base_url, config.base_url);
    assert_eq!(reloaded.request_timeout, config.request_timeout);
    assert_eq!(reloaded.theme, "nord");
    assert_eq!(reloaded.polling, config.polling);
    assert_eq!(reloaded.notifications, config.notifications);
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_file_or_env() {
    let config = Config::from_sources(FileConfig::default(), no_env);

    assert_eq!(config.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.request_timeout, Duration::from_millis(5000));
    assert!(config.enable_tui);
    assert_eq!(config.theme, "auto");
    assert_eq!(config.polling, PollingConfig::default());
    assert_eq!(config.notifications.ttl(), Duration::from_millis(3000));
    assert_eq!(config.notifications.ttl(), DEFAULT_TTL);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_prefix, "sketchdash");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
base_url = "http://from-file:5000"
request_timeout_ms = 1000
theme = "dracula"
"#,
    )
    .unwrap();

    let config = Config::from_sources(
        file,
        env_from(&[
            ("SKETCHDASH_URL", "http://from-env:5000"),
            ("SKETCHDASH_NO_TUI", "1"),
        ]),
    );

    assert_eq!(config.base_url, "http://from-env:5000");
    assert_eq!(config.request_timeout, Duration::from_millis(1000));
    assert_eq!(config.theme, "dracula");
    assert!(!config.enable_tui);
}

#[test]
fn test_invalid_timeout_env_falls_through() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("SKETCHDASH_TIMEOUT_MS", "soon")]),
    );
    assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
}

#[test]
fn test_cli_overrides_env() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("SKETCHDASH_URL", "http://from-env:5000")]),
    )
    .with_overrides(Some("http://from-cli:5000".to_string()), true);

    assert_eq!(config.base_url, "http://from-cli:5000");
    assert!(!config.enable_tui);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_partial_polling_section_keeps_other_defaults() {
    let file: FileConfig = toml::from_str("[polling]\nbaseline_ms = 4000\n").unwrap();
    let config = Config::from_sources(file, no_env);

    assert_eq!(config.polling.baseline_ms, 4000);
    assert_eq!(config.polling.clock_ms, 1000);
    assert_eq!(config.polling.accelerated_ms, 1000);
}

#[test]
fn test_zero_periods_are_raised_to_minimum() {
    let polling = PollingConfig {
        clock_ms: 0,
        baseline_ms: 0,
        accelerated_ms: 250,
    };
    let intervals = polling.intervals();

    assert_eq!(intervals.clock, Duration::from_millis(100));
    assert_eq!(intervals.baseline, Duration::from_millis(100));
    assert_eq!(intervals.accelerated, Duration::from_millis(250));
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let parsed: Result<FileConfig, _> = toml::from_str("future_option = 3\n[logging]\nlevel = \"debug\"\n");
    let config = Config::from_sources(parsed.unwrap(), no_env);
    assert_eq!(config.logging.level, "debug");
}
