//! Tracing setup for letterboxd-ics.
//!
//! The `RUST_LOG` environment variable overrides the default level.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during tracing initialization.
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber.
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Compact single-line format for interactive use.
    #[default]
    Compact,
    /// JSON format for structured log collection.
    Json,
}

/// Initializes the global subscriber. Call once, at startup.
pub fn init_tracing(default_level: Level, format: TracingFormat) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    match format {
        TracingFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_target(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        TracingFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_compact() {
        assert_eq!(TracingFormat::default(), TracingFormat::Compact);
    }
}
