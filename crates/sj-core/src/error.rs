//! # AppError
//!
//! Centralized error handling for swear-jar.
//! Store and scorer failures are returned as values and mapped to HTTP
//! responses once, at the API boundary.

use thiserror::Error;

/// The primary error type for all sj-core ports.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown resource (e.g., a list name other than blacklist/whitelist)
    #[error("{0} not found")]
    NotFound(String),

    /// Malformed request body (missing fields, score out of range, blank word)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The storage medium could not be read or written
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The remote scorer failed or answered with something unparsable
    #[error("remote scoring failed: {0}")]
    RemoteScoring(String),

    /// An optional collaborator (e.g., the scorer) is not configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

/// A specialized Result type for swear-jar logic.
pub type Result<T> = std::result::Result<T, AppError>;
