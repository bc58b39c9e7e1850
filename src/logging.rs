// src/logging.rs

//! Tracing setup for the `loopviz` binary.
//!
//! The filter is chosen in this order:
//! 1. `--log-level`, applied to every target;
//! 2. `LOOPVIZ_LOG`, read as full `EnvFilter` directives
//!    (e.g. `loopviz::engine=debug,warn`);
//! 3. `warn`.
//!
//! Output goes to stderr; stdout is reserved for the rendered run.

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "LOOPVIZ_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let (filter, rejected) = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Some(directives) = rejected {
        warn!(%directives, "ignoring invalid {LOG_ENV}; using `{DEFAULT_DIRECTIVES}`");
    }

    Ok(())
}

/// Build the filter from the CLI level and the raw env value.
///
/// The second element carries env directives that failed to parse, so the
/// caller can report them once a subscriber exists.
pub fn build_filter(
    cli_level: Option<LogLevel>,
    env: Option<&str>,
) -> (EnvFilter, Option<String>) {
    if let Some(level) = cli_level {
        return (EnvFilter::new(level.as_directive()), None);
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(_) => (
                EnvFilter::new(DEFAULT_DIRECTIVES),
                Some(directives.to_string()),
            ),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVES), None),
    }
}

impl LogLevel {
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
