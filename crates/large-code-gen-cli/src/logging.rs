// crates/large-code-gen-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Structured log setup for the fixture generator CLI.
// Purpose: Route tracing events to stderr behind an operator-selected filter.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Log events are emitted with `tracing` and written to stderr. The default
//! filter is [`DEFAULT_LOG_FILTER`], which keeps stderr silent on successful
//! runs so the generated artifact is the only output. Operators opt into
//! more detail with the [`LOG_ENV`] environment variable, which accepts any
//! `EnvFilter` directive (for example `large_code_gen=debug`).

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "LARGE_CODE_GEN_LOG";

/// Filter used when [`LOG_ENV`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter {directive}: {message}")]
    InvalidFilter {
        /// Directive as supplied by the operator.
        directive: String,
        /// Parser error message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("{0}")]
    Init(String),
}

/// Builds the event filter from an optional directive.
///
/// # Errors
/// Returns [`LoggingError::InvalidFilter`] when the directive does not parse.
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directive = directive.unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::try_new(directive).map_err(|err| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        message: err.to_string(),
    })
}

/// Installs the global stderr subscriber.
///
/// # Errors
/// Returns [`LoggingError`] when the directive is invalid or a subscriber is
/// already installed.
pub fn init(directive: Option<&str>) -> Result<(), LoggingError> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))
}
