//! Standardized error codes for log lines and exit diagnostics.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Configuration errors
//! - 2xx: Transport errors (Logseq HTTP API)
//! - 3xx: Decoding errors
//! - 4xx: Storage errors
//! - 5xx: Input errors

use serde::{Deserialize, Serialize};

/// Machine-readable classification of a [`crate::LogseqError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Config errors (1xx)
    // ========================================
    /// E101: Required config value is missing
    ConfigMissingRequired,
    /// E102: Config file or value is invalid
    ConfigInvalid,

    // ========================================
    // Transport errors (2xx)
    // ========================================
    /// E201: Logseq API could not be reached
    NetworkUnreachable,
    /// E202: Logseq API answered with a non-success status
    NetworkBadStatus,

    // ========================================
    // Decoding errors (3xx)
    // ========================================
    /// E301: JSON payload could not be decoded
    DecodeFailed,

    // ========================================
    // Storage errors (4xx)
    // ========================================
    /// E401: SQLite operation failed
    DatabaseError,
    /// E402: Filesystem operation on the store failed
    IoError,
    /// E403: Store has not been built yet
    StoreNotBuilt,

    // ========================================
    // Input errors (5xx)
    // ========================================
    /// E501: Required input was empty
    EmptyInput,
}

impl ErrorCode {
    /// Numeric form of the code (e.g. `StoreNotBuilt` -> 403).
    #[must_use]
    pub const fn numeric(self) -> u16 {
        match self {
            Self::ConfigMissingRequired => 101,
            Self::ConfigInvalid => 102,
            Self::NetworkUnreachable => 201,
            Self::NetworkBadStatus => 202,
            Self::DecodeFailed => 301,
            Self::DatabaseError => 401,
            Self::IoError => 402,
            Self::StoreNotBuilt => 403,
            Self::EmptyInput => 501,
        }
    }

    /// Category name used in log fields.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::ConfigMissingRequired | Self::ConfigInvalid => "config",
            Self::NetworkUnreachable | Self::NetworkBadStatus => "transport",
            Self::DecodeFailed => "decode",
            Self::DatabaseError | Self::IoError | Self::StoreNotBuilt => "storage",
            Self::EmptyInput => "input",
        }
    }

    /// Short recovery hint printed after the error message.
    #[must_use]
    pub const fn suggestion(self) -> &'static str {
        match self {
            Self::ConfigMissingRequired => {
                "Set the missing environment variable (e.g. LogseqToken) and retry"
            }
            Self::ConfigInvalid => "Check the config file and LOGSEQ_INDEX_* environment values",
            Self::NetworkUnreachable => {
                "Make sure Logseq is running with the HTTP APIs server enabled"
            }
            Self::NetworkBadStatus => "Check that the API token matches the one configured in Logseq",
            Self::DecodeFailed => "Rebuild the store with `logseq-index build`",
            Self::DatabaseError => "Check the query syntax, or rebuild with `logseq-index build`",
            Self::IoError => "Check permissions on the store directory",
            Self::StoreNotBuilt => "Run `logseq-index build` first",
            Self::EmptyInput => "Pass at least one value",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.numeric())
    }
}
