//! Edition model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notebook::codes::EditionShell;

/// One printing of a work.
///
/// `work_id` is the durable key of the parent work. It is assigned by the
/// storage layer after import, never by the parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edition {
    pub uuid: Uuid,
    pub work_id: Option<i64>,
    /// Parent work produced from the same record (princeps editions only)
    pub work_uuid: Option<Uuid>,
    pub work_identifier: Option<String>,
    pub ed_identifier: Option<String>,
    /// Seven-character edition code, `000` suffix for the princeps
    pub edition_counter: Option<String>,
    pub translation: Option<String>,
    pub author: Option<String>,
    pub translator: Option<String>,
    pub short_title: Option<String>,
    pub long_title: Option<String>,
    pub collection_title: Option<String>,
    pub publication_details: Option<String>,
    pub comments: Option<String>,
    pub final_comments: Option<String>,
    pub first_text: Option<String>,
    /// Raw holdings statement; exploded into holdings and not exported
    #[serde(skip)]
    pub holdings: Option<String>,
}

impl Edition {
    /// Build an edition from its shell under a fresh uuid
    pub fn from_shell(shell: EditionShell, work_uuid: Option<Uuid>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            work_id: None,
            work_uuid,
            work_identifier: shell.work_identifier,
            ed_identifier: shell.ed_identifier,
            edition_counter: shell.edition_counter,
            translation: shell.translation,
            author: shell.author,
            translator: shell.translator,
            short_title: shell.short_title,
            long_title: shell.long_title,
            collection_title: shell.collection_title,
            publication_details: shell.publication_details,
            comments: shell.comments,
            final_comments: shell.final_comments,
            first_text: shell.first_text,
            holdings: shell.holdings,
        }
    }
}
