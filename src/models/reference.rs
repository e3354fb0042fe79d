//! Bibliographic reference model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Period of the bibliography a reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum ReferenceType {
    #[serde(rename = "contemporary")]
    Contemporary = 1,
    #[serde(rename = "post-C18")]
    PostC18 = 2,
}

impl ReferenceType {
    /// Row id in the legacy reference-type table
    pub fn as_id(&self) -> i16 {
        *self as i16
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReferenceType::Contemporary => "contemporary",
            ReferenceType::PostC18 => "post-C18",
        };
        write!(f, "{}", label)
    }
}

/// Citation of a work in a bibliography
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub uuid: Uuid,
    pub work_uuid: Uuid,
    pub short_name: String,
    pub page_num: Option<u32>,
    pub ref_type: ReferenceType,
}

impl Reference {
    pub fn new(
        work_uuid: Uuid,
        short_name: impl Into<String>,
        page_num: Option<u32>,
        ref_type: ReferenceType,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            work_uuid,
            short_name: short_name.into(),
            page_num,
            ref_type,
        }
    }
}
