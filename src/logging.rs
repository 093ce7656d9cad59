// src/logging.rs

//! Logging setup for `watchreact` using `tracing` + `tracing-subscriber`.
//!
//! Filter selection:
//! 1. `--log-level` CLI flag (if provided) sets one global level.
//! 2. Otherwise `WATCHREACT_LOG` is read as `EnvFilter` directives, so both
//!    `debug` and `warn,watchreact::engine=trace` work.
//! 3. Missing or unparsable: `warn`, so rebuilds and reactions stay quiet.
//!
//! Logs are sent to STDERR; stdout carries the banner and the reaction
//! command's own output.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "WATCHREACT_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return EnvFilter::default().add_directive(level_filter(lvl).into());
    }

    env.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        filter.max_level_hint()
    }

    #[test]
    fn cli_level_beats_environment() {
        let filter = build_filter(Some(LogLevel::Debug), Some("trace"));
        assert_eq!(max_level(&filter), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn environment_accepts_directives() {
        let filter = build_filter(None, Some("warn,watchreact::engine=trace"));
        assert_eq!(max_level(&filter), Some(LevelFilter::TRACE));
        assert!(filter.to_string().contains("watchreact::engine=trace"));
    }

    #[test]
    fn missing_or_bad_environment_falls_back_to_warn() {
        assert_eq!(max_level(&build_filter(None, None)), Some(LevelFilter::WARN));
        assert_eq!(max_level(&build_filter(None, Some("  "))), Some(LevelFilter::WARN));
        assert_eq!(
            max_level(&build_filter(None, Some("watchreact=loud"))),
            Some(LevelFilter::WARN)
        );
    }
}
