//! Bedrock attachable generator.
//!
//! The crate joins a resource pack's item texture atlas against its item
//! mappings and emits one attachable definition per resolved item, plus the
//! shared geometry, render controller and animation documents they point at.
//!
//! The core is pure: [`identifier::to_join_key`] canonicalizes both naming
//! conventions, [`resolver::resolve`] joins records on that key and
//! [`descriptor::build`] picks the display family for each match. Loading,
//! writing and configuration live around it in [`manifest`], [`output`],
//! [`config`] and [`pipeline`].

pub mod config;
pub mod descriptor;
pub mod identifier;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod templates;

pub use config::{GeneratorArgs, GeneratorConfig, MappingSource};
pub use descriptor::{AnimationRefs, Descriptor, DisplayVariant, build};
pub use identifier::{JoinKey, file_stem, to_join_key};
pub use manifest::{
    MappingManifest, MappingRecord, TextureManifest, TextureRecord, load_mapping_manifest,
    load_texture_manifest,
};
pub use pipeline::{GenerationReport, run};
pub use resolver::{DuplicateKey, GenerationSummary, MissReport, Resolution, TextureTable, resolve};
pub use templates::Document;

use log::LevelFilter;

/// Initialize `env_logger` for a binary.
///
/// `RUST_LOG` wins when set; otherwise progress is logged at `info`, or only
/// errors when `quiet` is set.
pub fn init_logging(quiet: bool) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder
        .format_timestamp(None)
        .format_target(false)
        .init();
}
