//! Log output for the `gox` binary. Everything goes to stderr so generated
//! code written to stdout stays clean.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive when `--log-level` is absent.
pub const LOG_ENV: &str = "GOX_LOG";

const DEFAULT_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// `--log-level` wins over `GOX_LOG`; an unparsable `GOX_LOG` falls back to the default.
fn filter_for(level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        return EnvFilter::new(level.as_filter_str());
    }
    env.and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(level: Option<LogLevel>) {
    let env = std::env::var(LOG_ENV).ok();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level, env.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    // first subscriber wins
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_beats_environment() {
        let filter = filter_for(Some(LogLevel::Debug), Some("trace"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn environment_then_default() {
        assert_eq!(filter_for(None, Some("gox_syntax=trace")).to_string(), "gox_syntax=trace");
        assert_eq!(filter_for(None, None).to_string(), "warn");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(None);
        init_logging(Some(LogLevel::Error));
    }
}
