//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A plan endpoint is not an absolute path.
    #[error("invalid endpoint '{0}': must start with '/'")]
    InvalidEndpoint(String),

    /// A status code outside the HTTP range.
    #[error("invalid HTTP status code: {0}")]
    InvalidStatus(i64),

    /// A test declaration is incomplete or inconsistent.
    #[error("invalid test declaration: {0}")]
    InvalidDeclaration(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
