//! Holding model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A library holds a copy of an edition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holding {
    pub uuid: Uuid,
    pub edition_uuid: Uuid,
    /// Library short name, e.g. `Paris-BNF`
    pub short_name: String,
}

impl Holding {
    pub fn new(edition_uuid: Uuid, short_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            edition_uuid,
            short_name: short_name.into(),
        }
    }
}
