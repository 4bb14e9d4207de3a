use serde::{Deserialize, Serialize};

use super::blob::Blob;

/// Root row of the aggregate (`sets` table)
///
/// `(name, runner_rnbo_version)` is the natural key used for export; `id` is
/// assigned by the store and is never carried over on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Filename")]
    pub filename: String,

    /// Version of the runner that owns this set
    #[serde(rename = "Runner_rnbo_version")]
    pub runner_rnbo_version: String,

    /// Creation timestamp as stored by the runner (not interpreted, NULL kept)
    #[serde(rename = "Created_at")]
    pub created_at: Option<String>,

    #[serde(rename = "Meta")]
    pub meta: Blob,
}
