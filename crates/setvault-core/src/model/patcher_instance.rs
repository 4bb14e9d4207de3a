use serde::{Deserialize, Serialize};

use super::blob::Blob;

/// A placed patcher inside a set (`sets_patcher_instances`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatcherInstanceRecord {
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

    #[serde(rename = "Config")]
    pub config: Blob,
}
