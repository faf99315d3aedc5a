//! Error types shared between the parking client crates.
//!
//! The `ParkingError` enum unifies transport failures, backend-reported failures,
//! local input validation and (de)serialization problems, allowing every layer to
//! propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the parking crates.
#[derive(Error, Debug)]
pub enum ParkingError {
    /// I/O error originating from the standard library (files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/parsing error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The request never produced an HTTP response (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status code.
    #[error("Status {status}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message extracted from the response body, if any.
        message: Option<String>,
    },

    /// The backend answered, but the envelope did not carry `status == "ok"`.
    #[error("{0}")]
    Backend(String),

    /// User input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl ParkingError {
    /// Message the backend supplied for this failure, when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ParkingError::Status { message, .. } => message.as_deref(),
            ParkingError::Backend(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<PoisonError<T>> for ParkingError {
    fn from(err: PoisonError<T>) -> Self {
        ParkingError::MutexLock(err.to_string())
    }
}
