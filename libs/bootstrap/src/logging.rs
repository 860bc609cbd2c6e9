//! `tracing` subscriber initialisation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging section of the application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Level requested by `-v` flags: `-v` info, `-vv` debug, `-vvv` trace.
fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Effective default level: the configured one, raised by `-v` flags.
///
/// # Errors
/// Returns an error if `cfg.level` is not a level name.
pub fn effective_level(cfg: &LoggingConfig, verbose: u8) -> Result<LevelFilter> {
    let configured: LevelFilter = cfg
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", cfg.level))?;
    Ok(configured.max(verbosity_level(verbose)))
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the configured level entirely.
///
/// # Errors
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = effective_level(cfg, verbose)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("failed to install tracing subscriber")
}
