use serde::{Deserialize, Serialize};

/// Opaque text payload (set metadata, instance config, preset content)
///
/// Blobs are copied and compared, never parsed. A stored NULL stays distinct
/// from the empty string: it serializes as JSON `null` and is written back as
/// NULL. Present values serialize as the plain string they wrap so artifacts
/// stay readable by other tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blob(Option<String>);

impl Blob {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn null() -> Self {
        Self(None)
    }

    /// The wrapped text, `None` for a stored NULL
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<String> for Blob {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<&str> for Blob {
    fn from(value: &str) -> Self {
        Self(Some(value.to_string()))
    }
}

impl From<Option<String>> for Blob {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}
