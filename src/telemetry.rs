//! Tracing subscriber installation for the dispatch binary.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when neither `RUST_LOG` nor a configured directive is set.
pub const DEFAULT_FILTER: &str = "warehouse_dispatch=info,dispatch=info,warn";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// Directive as supplied.
        directive: String,
        /// Parser failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the event filter.
///
/// `RUST_LOG` wins when set and valid; otherwise `directive` is used, falling
/// back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `directive` does not parse.
pub fn filter(directive: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    let wanted = directive.unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(wanted).map_err(|source| TelemetryError::InvalidFilter {
        directive: wanted.to_owned(),
        source,
    })
}

/// Installs a formatting subscriber that writes to standard error.
///
/// Standard output is left free for command results.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(directive: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(filter(directive)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}
