//! Deserializable view of `textures/item_texture.json`.
//!
//! The atlas maps a compound key (`namespace.item_name`) to a texture path.
//! Only the path matters to the join; `resource_pack_name` is carried for
//! reporting. Entry order follows the document so duplicate keys resolve the
//! same way on every run.

use crate::manifest::records::TextureRecord;
use crate::manifest::schema::{ManifestSchema, validate_manifest};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
/// Item texture atlas as stored in the resource pack.
pub struct TextureManifest {
    #[serde(default)]
    pub resource_pack_name: Option<String>,
    #[serde(default)]
    pub texture_name: Option<String>,
    #[serde(default)]
    pub texture_data: IndexMap<String, TextureEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TextureEntry {
    #[serde(default)]
    pub textures: TexturePaths,
}

/// `textures` may be a single path or a list of frames/variants.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TexturePaths {
    Single(String),
    Many(Vec<String>),
}

impl Default for TexturePaths {
    fn default() -> Self {
        TexturePaths::Single(String::new())
    }
}

impl TexturePaths {
    /// The path attachables should bind: the single path, or the first entry
    /// of a list. `None` when that path is empty.
    pub fn primary(&self) -> Option<&str> {
        let path = match self {
            TexturePaths::Single(path) => path.as_str(),
            TexturePaths::Many(paths) => paths.first().map(String::as_str).unwrap_or(""),
        };
        if path.is_empty() { None } else { Some(path) }
    }
}

impl TextureManifest {
    /// Parse an atlas already held in memory.
    pub fn from_json_str(data: &str, origin: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_str(data)
            .with_context(|| format!("parsing JSON in {}", origin.display()))?;
        validate_manifest(ManifestSchema::ItemTexture, &raw, origin)?;
        // Decode from the text, not `raw`, so entry order survives.
        serde_json::from_str(data).with_context(|| format!("decoding {}", origin.display()))
    }

    /// Texture records in document order, skipping entries without a path.
    pub fn records(&self) -> Vec<TextureRecord> {
        self.texture_data
            .iter()
            .filter_map(|(key, entry)| match entry.textures.primary() {
                Some(path) => Some(TextureRecord::new(key.as_str(), path)),
                None => {
                    debug!("skipping texture entry {key}: no texture path");
                    None
                }
            })
            .collect()
    }

    pub fn pack_name(&self) -> &str {
        self.resource_pack_name.as_deref().unwrap_or("Unknown")
    }
}

/// Read, validate and decode the atlas at `path`.
pub fn load_texture_manifest(path: &Path) -> Result<TextureManifest> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading item texture manifest {}", path.display()))?;
    TextureManifest::from_json_str(&data, path)
}
