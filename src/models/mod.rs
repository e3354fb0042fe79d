//! Data models for imported Notebook records

pub mod edition;
pub mod error_record;
pub mod holding;
pub mod import_report;
pub mod reference;
pub mod work;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use edition::Edition;
pub use error_record::ErrorRecord;
pub use holding::Holding;
pub use import_report::{ImportCounts, ImportOutcome, ImportReport};
pub use reference::{Reference, ReferenceType};
pub use work::Work;

/// Any entity produced by the parser, tagged for the storage layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Work(Work),
    Edition(Edition),
    Holding(Holding),
    Reference(Reference),
}

impl Entity {
    pub fn as_work(&self) -> Option<&Work> {
        match self {
            Entity::Work(work) => Some(work),
            _ => None,
        }
    }

    pub fn as_edition(&self) -> Option<&Edition> {
        match self {
            Entity::Edition(edition) => Some(edition),
            _ => None,
        }
    }

    pub fn as_holding(&self) -> Option<&Holding> {
        match self {
            Entity::Holding(holding) => Some(holding),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Entity::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}
