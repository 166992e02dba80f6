//! The module contains the errors the tracker can throw.
//!
//! The two families match the two halves of every operation:
//!
//! - [`StoreError`] for local persistence failures, fatal to the
//!   triggering operation.
//! - [`RemoteError`] for server failures, never fatal: the caller treats
//!   them as "state unchanged remotely".

use thiserror::Error;

/// Local store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Remote accessor failures, mapped from HTTP status or transport errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
