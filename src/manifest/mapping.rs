//! Deserializable view of the custom item mappings.
//!
//! The manifest maps a source item name to a list of configuration entries.
//! Only `definition` entries describe a Bedrock item; other entry kinds
//! (groups, predicates) are dropped here so the resolver never sees them.

use crate::manifest::records::MappingRecord;
use crate::manifest::schema::{ManifestSchema, validate_manifest};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

const DEFINITION_KIND: &str = "definition";

#[derive(Clone, Debug, Default, Deserialize)]
/// Item mappings as authored for the Java -> Bedrock bridge.
pub struct MappingManifest {
    #[serde(default)]
    pub format_version: Option<u32>,
    #[serde(default)]
    pub items: IndexMap<String, Vec<MappingEntry>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MappingEntry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub bedrock_identifier: Option<String>,
    #[serde(default)]
    pub bedrock_options: BedrockOptions,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BedrockOptions {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub display_handheld: bool,
}

impl MappingEntry {
    pub fn is_definition(&self) -> bool {
        self.kind.as_deref() == Some(DEFINITION_KIND)
    }
}

impl MappingManifest {
    pub fn from_json_str(data: &str, origin: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_str(data)
            .with_context(|| format!("parsing JSON in {}", origin.display()))?;
        validate_manifest(ManifestSchema::ItemMappings, &raw, origin)?;
        serde_json::from_str(data).with_context(|| format!("decoding {}", origin.display()))
    }

    /// Definition records in document order.
    ///
    /// Definitions with a missing or blank identifier cannot be joined and are
    /// skipped with a warning naming the source item.
    pub fn records(&self) -> Vec<MappingRecord> {
        let mut records = Vec::new();
        for (source, entries) in &self.items {
            for entry in entries.iter().filter(|entry| entry.is_definition()) {
                match entry.bedrock_identifier.as_deref().map(str::trim) {
                    Some(identifier) if !identifier.is_empty() => records.push(
                        MappingRecord::new(identifier, entry.bedrock_options.display_handheld),
                    ),
                    _ => warn!("definition under {source} has no bedrock_identifier; skipped"),
                }
            }
        }
        records
    }
}

/// Read, validate and decode the mappings at `path`.
pub fn load_mapping_manifest(path: &Path) -> Result<MappingManifest> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading item mappings {}", path.display()))?;
    MappingManifest::from_json_str(&data, path)
}

// Hand-edited mappings spell the flag as a bool, a string or a number; null
// and anything unrecognised count as not handheld.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    })
}
