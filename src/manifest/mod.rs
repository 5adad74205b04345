//! Input manifest wiring.
//!
//! Wraps the pack's item texture atlas and the item mappings so the pipeline
//! can load validated, typed views and hand plain records to the resolver.
//! Missing or malformed manifests are errors here; everything past this module
//! treats an empty record list as ordinary input.

pub mod mapping;
pub mod records;
pub mod schema;
pub mod texture;

pub use mapping::{BedrockOptions, MappingEntry, MappingManifest, load_mapping_manifest};
pub use records::{MappingRecord, TextureRecord};
pub use schema::{ManifestSchema, validate_manifest};
pub use texture::{TextureEntry, TextureManifest, TexturePaths, load_texture_manifest};
