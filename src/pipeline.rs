//! One generation run, end to end.
//!
//! Manifests are loaded and resolved before anything touches the output
//! directory, so a broken input never leaves a half-cleaned output behind.
//! Unmatched mappings and duplicate atlas keys are reported through the log
//! and in the returned [`GenerationReport`]; neither fails the run.

use crate::config::{GeneratorConfig, MappingSource};
use crate::identifier::to_join_key;
use crate::manifest::{MappingRecord, TextureRecord, load_mapping_manifest, load_texture_manifest};
use crate::output::{clean_output, copy_tree, prepare_layout, write_document};
use crate::resolver::{Resolution, resolve};
use crate::templates::{attachable_document, shared_documents};
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug)]
pub struct GenerationReport {
    pub resource_pack_name: String,
    pub resolution: Resolution,
    /// Every document written, attachables first. Empty on a dry run.
    pub written: Vec<PathBuf>,
    /// Files copied from the input pack when `copy_input` is set.
    pub copied_files: usize,
}

/// Load, resolve and (unless `dry_run`) write one pack.
pub fn run(config: &GeneratorConfig) -> Result<GenerationReport> {
    config.validate()?;

    let texture_manifest = load_texture_manifest(&config.texture_manifest)?;
    let resource_pack_name = texture_manifest.pack_name().to_string();
    info!("Resource pack: {resource_pack_name}");
    let textures = texture_manifest.records();
    info!(
        "Found {} texture entries in {}",
        textures.len(),
        config.texture_manifest.display()
    );

    let mappings = load_mapping_records(&config.mappings, &textures)?;
    if mappings.is_empty() && config.mappings == MappingSource::TextureKeys {
        bail!(
            "No items found to process in {}",
            config.texture_manifest.display()
        );
    }

    let resolution = resolve(&mappings, &textures);
    report_diagnostics(&resolution);

    if config.dry_run {
        info!("Dry run: nothing written");
        return Ok(GenerationReport {
            resource_pack_name,
            resolution,
            written: Vec::new(),
            copied_files: 0,
        });
    }

    if config.clean_output {
        info!("Cleaning existing output {}", config.output_dir.display());
        clean_output(&config.output_dir)?;
    }
    let copied_files = if config.copy_input {
        let copied = copy_tree(&config.input_dir, &config.output_dir).with_context(|| {
            format!(
                "copying {} into {}",
                config.input_dir.display(),
                config.output_dir.display()
            )
        })?;
        info!("Copied {copied} input files");
        copied
    } else {
        0
    };

    prepare_layout(&config.output_dir)?;
    let shared = shared_documents();
    let mut written = Vec::with_capacity(resolution.descriptors.len() + shared.len());
    for descriptor in &resolution.descriptors {
        let path = write_document(&config.output_dir, &attachable_document(descriptor))?;
        info!(
            "{} <- {} ({})",
            path.display(),
            descriptor.identifier,
            descriptor.family()
        );
        written.push(path);
    }
    info!("Generated {} attachable files", resolution.descriptors.len());

    for document in &shared {
        let path = write_document(&config.output_dir, document)?;
        debug!("shared document {}", path.display());
        written.push(path);
    }

    let summary = &resolution.summary;
    info!(
        "Matched {} of {} mappings ({} held, {} standard, {} missing)",
        summary.matched,
        summary.total(),
        summary.held,
        summary.standard,
        summary.missing
    );

    Ok(GenerationReport {
        resource_pack_name,
        resolution,
        written,
        copied_files,
    })
}

/// Mapping records for `source`.
///
/// In texture-key mode each canonical atlas key yields one standard mapping;
/// keys that collapse onto the same join key only produce one.
pub fn load_mapping_records(
    source: &MappingSource,
    textures: &[TextureRecord],
) -> Result<Vec<MappingRecord>> {
    match source {
        MappingSource::File(path) => {
            let manifest = load_mapping_manifest(path)?;
            let records = manifest.records();
            info!(
                "Found {} item definitions in {}",
                records.len(),
                path.display()
            );
            Ok(records)
        }
        MappingSource::TextureKeys => {
            info!("No item mappings configured; attaching every atlas entry");
            let mut seen = HashSet::new();
            Ok(textures
                .iter()
                .filter(|record| seen.insert(to_join_key(&record.key)))
                .map(|record| MappingRecord::from_texture_key(&record.key))
                .collect())
        }
    }
}

fn report_diagnostics(resolution: &Resolution) {
    for duplicate in &resolution.duplicates {
        warn!(
            "texture key {} overrides {} for {} ({} replaces {})",
            duplicate.kept.key,
            duplicate.replaced.key,
            duplicate.join_key,
            duplicate.kept.path,
            duplicate.replaced.path
        );
    }
    for miss in &resolution.misses {
        warn!(
            "no texture for {} (looked up {})",
            miss.identifier, miss.join_key
        );
    }
}
