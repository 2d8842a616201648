//! Error types for nbquery
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for nbquery operations
///
/// This enum encompasses all possible errors that can occur while
/// resolving configuration, talking to the Query API, and rendering
/// responses. The two failure kinds the API client distinguishes are
/// transport failures (`Http`) and application failures (`Api`), the
/// latter carrying the HTTP status and raw response body as diagnostics.
#[derive(Error, Debug)]
pub enum NbqueryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Application-level API failure (non-2xx status from the server)
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Transport-level HTTP errors (connection, DNS, timeout)
    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for nbquery operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
