use crate::identifier::to_join_key;
use serde::{Deserialize, Serialize};

/// One atlas entry: compound texture key plus its (non-empty) texture path.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub key: String,
    pub path: String,
}

impl TextureRecord {
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// One definition entry of the item mappings.
///
/// Loaders only hand the resolver definition entries whose identifier is
/// non-empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub identifier: String,
    #[serde(default)]
    pub display_handheld: bool,
}

impl MappingRecord {
    pub fn new(identifier: impl Into<String>, display_handheld: bool) -> Self {
        Self {
            identifier: identifier.into(),
            display_handheld,
        }
    }

    /// Mapping used when a pack ships no item mappings: every atlas entry is
    /// attached under its canonical key with the standard display.
    pub fn from_texture_key(key: &str) -> Self {
        Self {
            identifier: to_join_key(key).0,
            display_handheld: false,
        }
    }
}
