//! Console logging setup for binaries and test harnesses.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the host. `RUST_LOG` overrides the default level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// `RUST_LOG` could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already set.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Default filter directive.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "vsrdle=debug,info"
    } else {
        "warn"
    }
}

/// Install a stderr subscriber.
///
/// `verbose` raises this crate to debug level, which logs every round
/// that is built.
pub fn init_logging(verbose: bool) -> Result<(), LoggingError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(default_directive(verbose))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()?;

    tracing::debug!(verbose, "logging initialized");
    Ok(())
}
