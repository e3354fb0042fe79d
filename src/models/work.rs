//! Work (princeps) model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notebook::codes::WorkShell;

/// Original publication of a work, as catalogued by its princeps record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Work {
    pub uuid: Uuid,
    /// Legacy identifier (work signature), e.g. `02FR.ABC.xyz`
    pub work_identifier: Option<String>,
    pub translation: Option<String>,
    pub title: Option<String>,
    pub comments: Option<String>,
    pub bur_references: Option<String>,
    pub bur_comments: Option<String>,
    pub original_title: Option<String>,
    pub translation_comments: Option<String>,
    pub description: Option<String>,
}

impl Work {
    /// Build a work from its shell under a fresh uuid
    pub fn from_shell(shell: WorkShell) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            work_identifier: shell.work_identifier,
            translation: shell.translation,
            title: shell.title,
            comments: shell.comments,
            bur_references: shell.bur_references,
            bur_comments: shell.bur_comments,
            original_title: shell.original_title,
            translation_comments: shell.translation_comments,
            description: shell.description,
        }
    }
}
