//! Error types for project loading and data-model actions.
//!
//! Cost aggregation itself never fails: malformed numbers fall back to zero.
//! Errors are reserved for unreadable project files, unknown enumerations
//! and actions that reference entities which do not exist.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for quote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// Project JSON could not be decoded (-3)
    ParseError = -3,
    /// Unknown currency code (E100)
    UnknownCurrency = 100,
    /// Unknown calculation mode (E101)
    UnknownMode = 101,
    /// Referenced entity does not exist (E200)
    NotFound = 200,
    /// Action rejected because of its arguments (E201)
    InvalidAction = 201,
}

/// Main error type for the quoting engine.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown currency '{value}', expected PLN or EUR")]
    UnknownCurrency { value: String },

    #[error("Unknown calculation mode '{value}', expected INITIAL or FINAL")]
    UnknownMode { value: String },

    #[error("A merged transport needs at least 2 suppliers, got {count}")]
    MergeTooSmall { count: usize },

    #[error("Transport entry not found: {id}")]
    TransportNotFound { id: String },

    #[error("Variant not found: {id}")]
    VariantNotFound { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::FileNotFound { .. } => ErrorCode::FileNotFound,
            QuoteError::EmptyFile { .. } => ErrorCode::EmptyFile,
            QuoteError::Json(_) => ErrorCode::ParseError,
            QuoteError::UnknownCurrency { .. } => ErrorCode::UnknownCurrency,
            QuoteError::UnknownMode { .. } => ErrorCode::UnknownMode,
            QuoteError::MergeTooSmall { .. } => ErrorCode::InvalidAction,
            QuoteError::TransportNotFound { .. } => ErrorCode::NotFound,
            QuoteError::VariantNotFound { .. } => ErrorCode::NotFound,
            QuoteError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for quoting operations.
pub type Result<T> = std::result::Result<T, QuoteError>;
