/*!
 * Error types for the lexstore application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors surfaced by the translation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Schema upgrade or handle acquisition failed. Fatal for the session;
    /// the store never retries an open on the caller's behalf.
    #[error("Failed to open translation store: {0}")]
    Open(String),

    /// A batch write or clear failed. No partial effects of the batch are
    /// visible; the whole batch may be retried since writes are upserts.
    #[error("Write failed: {0}")]
    Write(String),

    /// A scan or seek failed partway. Distinct from normal stream end so the
    /// caller can tell "no more matches" apart from "scan failed".
    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Wrap an engine-level error as an open failure
    pub fn open(error: impl std::fmt::Display) -> Self {
        Self::Open(error.to_string())
    }

    /// Wrap an engine-level error as a write failure
    pub fn write(error: impl std::fmt::Display) -> Self {
        Self::Write(error.to_string())
    }

    /// Wrap an engine-level error as a query failure
    pub fn query(error: impl std::fmt::Display) -> Self {
        Self::Query(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the translation store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
