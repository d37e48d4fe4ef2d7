//! Error handling for logseq-index.
//!
//! This module provides:
//! - [`LogseqError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for diagnostics

mod codes;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for logseq-index operations.
#[derive(Error, Debug)]
pub enum LogseqError {
    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Logseq API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Logseq API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("JSON decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Store not built at {}", .0.display())]
    StoreNotBuilt(PathBuf),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl LogseqError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Transport(_) => ErrorCode::NetworkUnreachable,
            Self::HttpStatus { .. } => ErrorCode::NetworkBadStatus,
            Self::Decode(_) => ErrorCode::DecodeFailed,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::StoreNotBuilt(_) => ErrorCode::StoreNotBuilt,
            Self::EmptyInput(_) => ErrorCode::EmptyInput,
        }
    }
}

/// Result type alias using [`LogseqError`].
pub type Result<T> = std::result::Result<T, LogseqError>;
