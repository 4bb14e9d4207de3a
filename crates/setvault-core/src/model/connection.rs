use serde::{Deserialize, Serialize};

/// A wire between two ports of the patching graph (`sets_connections`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    /// Owning set; rewritten on import
    #[serde(rename = "Set_Id")]
    pub set_id: i64,

    #[serde(rename = "Source_name")]
    pub source_name: String,

    #[serde(rename = "Source_instance_index")]
    pub source_instance_index: i64,

    #[serde(rename = "Source_port_name")]
    pub source_port_name: String,

    #[serde(rename = "Sink_name")]
    pub sink_name: String,

    #[serde(rename = "Sink_instance_index")]
    pub sink_instance_index: i64,

    #[serde(rename = "Sink_port_name")]
    pub sink_port_name: String,
}

