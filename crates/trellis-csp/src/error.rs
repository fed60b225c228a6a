//! Error types for CSP handling.

use thiserror::Error;

/// Result type alias for CSP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or editing a policy.
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The directive name is not part of the CSP catalogue.
    #[error("Unknown CSP directive: {0}")]
    UnknownDirective(String),

    /// The directive cannot be used for the requested operation.
    #[error("Directive {directive} does not support {operation}")]
    InvalidDirective {
        /// Name of the directive.
        directive: String,
        /// The operation attempted (`nonces` or `hashes`).
        operation: &'static str,
    },

    /// The hash algorithm is not supported.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl Error {
    /// Create an unknown directive error.
    pub fn unknown_directive(name: impl Into<String>) -> Self {
        Error::UnknownDirective(name.into())
    }

    /// Create an invalid directive error.
    pub fn invalid_directive(directive: impl Into<String>, operation: &'static str) -> Self {
        Error::InvalidDirective {
            directive: directive.into(),
            operation,
        }
    }
}
