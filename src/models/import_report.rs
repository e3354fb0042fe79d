//! Import outcome and report models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ErrorRecord};

/// Per-batch record counters.
///
/// Every raw record lands in exactly one of `successes`, `errors` or
/// `hidden`. Non-fatal diagnostics do not move a record out of `successes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub total: usize,
    pub successes: usize,
    pub errors: usize,
    pub hidden: usize,
}

/// Everything one batch produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub entities: Vec<Entity>,
    pub errors: Vec<ErrorRecord>,
    pub counts: ImportCounts,
}

/// Report handed to the storage layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub counts: ImportCounts,
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorRecord>,
}

impl ImportReport {
    pub fn new(source: impl Into<String>, outcome: ImportOutcome) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            counts: outcome.counts,
            entities: outcome.entities,
            errors: outcome.errors,
        }
    }
}
