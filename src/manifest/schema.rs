//! JSON Schema gate for the two input manifests.
//!
//! Schemas ship inside the binary (`schema/*.schema.json`) so a pack can be
//! processed from any working directory. Validation runs on the raw JSON before
//! typed decoding; a failure lists every violation with its instance path so a
//! broken manifest can be fixed in one pass.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::Path;

const ITEM_TEXTURE_SCHEMA: &str = include_str!("../../schema/item_texture.schema.json");
const ITEM_MAPPINGS_SCHEMA: &str = include_str!("../../schema/item_mappings.schema.json");

/// Which bundled schema a manifest is checked against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ManifestSchema {
    ItemTexture,
    ItemMappings,
}

impl ManifestSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestSchema::ItemTexture => "item texture manifest",
            ManifestSchema::ItemMappings => "item mappings manifest",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            ManifestSchema::ItemTexture => ITEM_TEXTURE_SCHEMA,
            ManifestSchema::ItemMappings => ITEM_MAPPINGS_SCHEMA,
        }
    }

    fn compile(&self) -> Result<JSONSchema> {
        let raw: Value = serde_json::from_str(self.source())
            .map_err(|err| anyhow!("bundled {} schema is not JSON: {err}", self.as_str()))?;
        JSONSchema::compile(&raw)
            .map_err(|err| anyhow!("compiling bundled {} schema: {err}", self.as_str()))
    }
}

/// Validate `instance` against the bundled schema for `kind`.
///
/// `origin` is only used to label the error.
pub fn validate_manifest(kind: ManifestSchema, instance: &Value, origin: &Path) -> Result<()> {
    let compiled = kind.compile()?;
    if let Err(errors) = compiled.validate(instance) {
        let details = errors
            .map(|err| {
                let pointer = err.instance_path.to_string();
                if pointer.is_empty() {
                    format!("  - {err}")
                } else {
                    format!("  - {pointer}: {err}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "{} {} failed schema validation:\n{}",
            kind.as_str(),
            origin.display(),
            details
        );
    }
    Ok(())
}
