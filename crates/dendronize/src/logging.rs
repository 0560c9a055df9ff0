//! Subscriber setup for the binary.
//!
//! Everything goes to stderr so stdout carries only the report. Library
//! crates log through `log`; the subscriber's log bridge picks those up.

use crate::cli::LogFormat;
use tracing_subscriber::EnvFilter;

/// Level filter from the configured level and the `-v` count
pub fn effective_level(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_ascii_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_configured_level() {
        assert_eq!(effective_level("WARN", 0), "warn");
        assert_eq!(effective_level("warn", 1), "debug");
        assert_eq!(effective_level("info", 3), "trace");
    }
}
