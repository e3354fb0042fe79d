//! Error record model
//!
//! Rejected and partially processed records are kept for operator review,
//! together with the raw text needed to repair them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordIssue;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Input the record came from (usually the export file name)
    pub source: String,
    pub text: String,
    pub error_note: String,
    pub work_uuid: Option<Uuid>,
    pub edition_uuid: Option<Uuid>,
    pub recorded_at: DateTime<Utc>,
}

impl ErrorRecord {
    pub fn new(source: impl Into<String>, text: impl Into<String>, issue: &RecordIssue) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            error_note: issue.to_string(),
            work_uuid: None,
            edition_uuid: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_work(mut self, work_uuid: Option<Uuid>) -> Self {
        self.work_uuid = work_uuid;
        self
    }

    pub fn with_edition(mut self, edition_uuid: Option<Uuid>) -> Self {
        self.edition_uuid = edition_uuid;
        self
    }
}
