//! # Error Types
//!
//! This module defines error types used throughout the afiche library.

use thiserror::Error;

/// Main error type for afiche operations
#[derive(Debug, Error)]
pub enum AficheError {
    /// Structurally invalid design document (the only fatal input condition)
    #[error("Design document error: {0}")]
    Design(String),

    /// Asset download or storage failure
    #[error("Asset error: {0}")]
    Asset(String),

    /// Protocol document serialization failure
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
