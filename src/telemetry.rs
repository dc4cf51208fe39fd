//! Diagnostic logging to stderr.

use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl LoggingSettings {
    /// Build settings from the raw `--log-level` / `--log-json` values.
    pub fn from_flags(level: &str, json: bool) -> Result<Self, CliError> {
        let level = LevelFilter::from_str(level)
            .map_err(|err| CliError::usage(format!("invalid log level `{level}`: {err}")))?;
        Ok(Self {
            level,
            format: if json {
                LogFormat::Json
            } else {
                LogFormat::Compact
            },
        })
    }
}

/// Install a global tracing subscriber. `RUST_LOG` overrides the level.
pub fn init(logging: LoggingSettings) -> Result<(), CliError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| CliError::usage(format!("failed to install tracing subscriber: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_and_format() {
        let settings = LoggingSettings::from_flags("debug", true).expect("valid level");
        assert_eq!(settings.level, LevelFilter::DEBUG);
        assert_eq!(settings.format, LogFormat::Json);

        let off = LoggingSettings::from_flags("off", false).expect("valid level");
        assert_eq!(off.level, LevelFilter::OFF);
    }

    #[test]
    fn rejects_unknown_level() {
        let err = LoggingSettings::from_flags("loud", false).expect_err("invalid level");
        assert!(matches!(err, CliError::Usage(_)));
    }
}
