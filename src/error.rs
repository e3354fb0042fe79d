//! Error types for the MMF importer
//!
//! Two families live here. `AppError` is fatal and aborts a whole run;
//! `RecordIssue` is a per-record diagnostic that ends up in an
//! [`ErrorRecord`](crate::models::ErrorRecord) and never stops the batch.

use std::collections::BTreeSet;

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Diagnostic attached to a single record.
///
/// The `Display` output is the operator-facing `error_note`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    #[error("No identifier")]
    NoIdentifier,

    #[error("Incomplete identifiers")]
    IncompleteIdentifiers,

    #[error("Invalid identifier")]
    InvalidIdentifier,

    #[error("Junk holdings")]
    JunkHoldings,

    #[error("Unused codes: {{{}}}", join_codes(.0))]
    UnusedCodes(BTreeSet<String>),
}

impl RecordIssue {
    /// Whether the issue prevents the record from producing any entity
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RecordIssue::NoIdentifier
                | RecordIssue::IncompleteIdentifiers
                | RecordIssue::InvalidIdentifier
        )
    }
}

fn join_codes(codes: &BTreeSet<String>) -> String {
    codes.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
