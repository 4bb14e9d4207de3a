use serde::{Deserialize, Serialize};

use super::blob::Blob;

/// A stored preset for one patcher instance of a set (`sets_presets`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    /// Reference to a patcher owned by the runner; copied verbatim, never validated
    #[serde(rename = "Patcher_id")]
    pub patcher_id: i64,

    /// Owning set; rewritten on import
    #[serde(rename = "Set_id")]
    pub set_id: i64,

    #[serde(rename = "Set_instance_index")]
    pub set_instance_index: i64,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Content")]
    pub content: Blob,

    /// 0/1 flag as stored by the runner
    #[serde(rename = "Initial")]
    pub initial: i64,

    /// Timestamps are copied verbatim; NULL stays NULL
    #[serde(rename = "Created_at")]
    pub created_at: Option<String>,

    #[serde(rename = "Updated_at")]
    pub updated_at: Option<String>,
}

impl PresetRecord {
    pub fn is_initial(&self) -> bool {
        self.initial != 0
    }
}
