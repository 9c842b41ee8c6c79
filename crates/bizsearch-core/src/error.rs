//! Fatal error taxonomy shared by every layer that drives a search session.
//!
//! Two kinds of failure halt the current operation:
//!
//! - [`AppError::Configuration`]: the caller's state management is broken
//!   (unknown sort name, a required session field is absent).
//! - [`AppError::Io`]: an external collaborator failed (query service,
//!   favorites store). The original error is kept as the `source`.
//!
//! Neither kind is retried automatically. The user-facing rendition of both
//! is the same generic [`FATAL_NOTICE`].

use thiserror::Error;

/// Generic notice shown in place of the active view after a fatal error.
pub const FATAL_NOTICE: &str = "An error occurred. Please contact support.";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    /// Builds a [`AppError::Configuration`] from any displayable message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Wraps an external failure with a short description of what was attempted.
    pub fn io<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
