//! Run configuration shared by the binaries.
//!
//! Flags fall back to environment variables so batch wrappers can point the
//! generator at a pack without rewriting the command line. Relative manifest
//! paths are resolved against the input directory.

use anyhow::{Result, bail};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

pub const INPUT_ENV: &str = "ATTACHABLES_INPUT";
pub const OUTPUT_ENV: &str = "ATTACHABLES_OUTPUT";
pub const TEXTURE_MANIFEST_ENV: &str = "ATTACHABLES_TEXTURE_MANIFEST";
pub const MAPPING_MANIFEST_ENV: &str = "ATTACHABLES_MAPPING_MANIFEST";

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TEXTURE_MANIFEST: &str = "textures/item_texture.json";

// Looked up under the input directory, in order, when no mappings file is named.
const MAPPING_MANIFEST_CANDIDATES: &[&str] = &["geyser_mappings.json", "mappings.json"];

/// Command-line surface for a generation run.
#[derive(Args, Clone, Debug)]
pub struct GeneratorArgs {
    /// Resource pack directory to read from
    #[arg(short, long, env = INPUT_ENV, default_value = DEFAULT_INPUT_DIR)]
    pub input: PathBuf,

    /// Directory that receives the generated files
    #[arg(short, long, env = OUTPUT_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Item texture atlas, relative to the input directory unless absolute
    #[arg(long, env = TEXTURE_MANIFEST_ENV, default_value = DEFAULT_TEXTURE_MANIFEST)]
    pub textures: PathBuf,

    /// Item mappings file, relative to the input directory unless absolute
    #[arg(long, env = MAPPING_MANIFEST_ENV, conflicts_with = "no_mappings")]
    pub mappings: Option<PathBuf>,

    /// Ignore any mappings file and attach every atlas entry
    #[arg(long)]
    pub no_mappings: bool,

    /// Copy the input pack into the output directory first
    #[arg(long)]
    pub copy_input: bool,

    /// Remove an existing output directory before generating
    #[arg(long)]
    pub clean: bool,

    /// Resolve and report without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Where mapping records come from for a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MappingSource {
    /// Read definitions from this mappings file.
    File(PathBuf),
    /// Derive one standard mapping per atlas entry.
    TextureKeys,
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub texture_manifest: PathBuf,
    pub mappings: MappingSource,
    pub copy_input: bool,
    pub clean_output: bool,
    pub dry_run: bool,
}

impl GeneratorConfig {
    /// Config for `input_dir` -> `output_dir` with every other setting at its
    /// default and mappings discovered from the input directory.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let mappings = discover_mapping_manifest(&input_dir);
        Self {
            texture_manifest: input_dir.join(DEFAULT_TEXTURE_MANIFEST),
            input_dir,
            output_dir: output_dir.into(),
            mappings,
            copy_input: false,
            clean_output: false,
            dry_run: false,
        }
    }

    /// Reject configurations that would read from or wipe the wrong place.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            bail!(
                "input directory {} not found; place the resource pack there",
                self.input_dir.display()
            );
        }
        let input = canonicalize_path(&self.input_dir);
        let output = canonicalize_path(&self.output_dir);
        if input == output {
            bail!(
                "output directory {} must differ from the input directory",
                self.output_dir.display()
            );
        }
        if self.clean_output && input.starts_with(&output) {
            bail!(
                "refusing to clean {}: it contains the input directory",
                self.output_dir.display()
            );
        }
        if self.copy_input && output.starts_with(&input) {
            bail!(
                "cannot copy {} into {}: the output lies inside the input",
                self.input_dir.display(),
                self.output_dir.display()
            );
        }
        Ok(())
    }
}

impl GeneratorArgs {
    pub fn into_config(self) -> GeneratorConfig {
        let texture_manifest = resolve_against(&self.input, self.textures);
        let mappings = if self.no_mappings {
            MappingSource::TextureKeys
        } else if let Some(path) = self.mappings {
            MappingSource::File(resolve_against(&self.input, path))
        } else {
            discover_mapping_manifest(&self.input)
        };
        GeneratorConfig {
            input_dir: self.input,
            output_dir: self.output,
            texture_manifest,
            mappings,
            copy_input: self.copy_input,
            clean_output: self.clean,
            dry_run: self.dry_run,
        }
    }
}

/// First mappings candidate present under `input_dir`, else texture-key mode.
pub fn discover_mapping_manifest(input_dir: &Path) -> MappingSource {
    MAPPING_MANIFEST_CANDIDATES
        .iter()
        .map(|name| input_dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(MappingSource::File)
        .unwrap_or(MappingSource::TextureKeys)
}

fn resolve_against(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { base.join(path) }
}

// Output directories usually do not exist yet; canonicalize their parent so
// comparisons against the input still line up.
fn canonicalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
