//! Error types for the address validator
//!
//! This module defines all error types that can occur while reading addresses,
//! talking to the remote verification service, and persisting the lookup cache.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Batch Errors**: the pending batch is at its size ceiling
//! - **Input Errors**: malformed tabular input, missing required columns
//! - **Remote Errors**: rejected credentials, rejected payloads, transport failures
//! - **File Errors**: I/O failures and corrupt cache files

use thiserror::Error;

/// Main error type for the address validator
///
/// Every failure except `BatchFull` aborts the run. `BatchFull` is the
/// caller's signal to flush (load results and clear) before adding more.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressError {
    /// The batch already holds `max_batch_size` distinct lookups
    ///
    /// Recoverable: flush the batch and retry the add.
    #[error("Batch is full: cannot hold more than {max_batch_size} lookups")]
    BatchFull {
        /// The ceiling the batch was built with
        max_batch_size: usize,
    },

    /// The input stream could not be parsed as tabular text
    ///
    /// Fatal. Raised before any remote call is made.
    #[error("Malformed input{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedInput {
        /// Line number where the problem was detected (if available)
        line: Option<u64>,
        /// Description of the parsing problem
        message: String,
    },

    /// The remote service rejected the supplied credentials (HTTP 401)
    #[error("Remote service rejected the supplied credentials")]
    BadCredentials,

    /// The remote service rejected the submitted payload (HTTP 400/422)
    #[error("Remote service rejected the request as unprocessable: {message}")]
    UnprocessableInput {
        /// Status or body detail reported by the service
        message: String,
    },

    /// Any other transport-level failure
    ///
    /// Timeouts, connection resets, unexpected statuses and undecodable bodies.
    #[error("Remote request failed: {message}")]
    RemoteFailure {
        /// Description of the failure
        message: String,
    },

    /// I/O error while reading input, writing output, or touching the cache file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The cache file exists but is not a flat string-to-string JSON object
    #[error("Cache file '{path}' is corrupt: {message}")]
    CacheCorrupt {
        /// Path of the offending cache file
        path: String,
        /// Deserialization error detail
        message: String,
    },
}

impl From<std::io::Error> for AddressError {
    fn from(error: std::io::Error) -> Self {
        AddressError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error keeps the line number when csv knows it
impl From<csv::Error> for AddressError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AddressError::MalformedInput {
            line,
            message: error.to_string(),
        }
    }
}

// The request URL carries the credentials in its query string, so it is
// stripped before the error is rendered
impl From<reqwest::Error> for AddressError {
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        let message = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else {
            error.to_string()
        };
        AddressError::RemoteFailure { message }
    }
}

// Helper functions for creating common errors

impl AddressError {
    /// Create a BatchFull error
    pub fn batch_full(max_batch_size: usize) -> Self {
        AddressError::BatchFull { max_batch_size }
    }

    /// Create a MalformedInput error
    pub fn malformed_input(line: Option<u64>, message: &str) -> Self {
        AddressError::MalformedInput {
            line,
            message: message.to_string(),
        }
    }

    /// Create an UnprocessableInput error
    pub fn unprocessable_input(message: &str) -> Self {
        AddressError::UnprocessableInput {
            message: message.to_string(),
        }
    }

    /// Create a RemoteFailure error
    pub fn remote_failure(message: &str) -> Self {
        AddressError::RemoteFailure {
            message: message.to_string(),
        }
    }

    /// Create a CacheCorrupt error
    pub fn cache_corrupt(path: &str, message: &str) -> Self {
        AddressError::CacheCorrupt {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the caller can recover by flushing the batch
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AddressError::BatchFull { .. })
    }
}
