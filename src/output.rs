//! On-disk layout for generated documents.
//!
//! Documents are written as pretty JSON with four-space indentation under the
//! output root. The helpers here also cover the pack-level chores around a
//! run: laying out the directory tree, clearing a previous output and copying
//! the input pack across.

use crate::templates::{
    ANIMATIONS_DIR, ATTACHABLES_DIR, Document, MODELS_DIR, RENDER_CONTROLLERS_DIR,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Serialize with the indentation Bedrock tooling and the vanilla packs use.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("serializing JSON document")?;
    String::from_utf8(buf).context("serialized JSON was not UTF-8")
}

/// Create every directory a run writes into.
pub fn prepare_layout(output_root: &Path) -> Result<()> {
    for dir in [ATTACHABLES_DIR, ANIMATIONS_DIR, MODELS_DIR, RENDER_CONTROLLERS_DIR] {
        let path = output_root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("creating output directory {}", path.display()))?;
    }
    Ok(())
}

/// Write one document below `output_root`, returning the full path.
pub fn write_document(output_root: &Path, document: &Document) -> Result<PathBuf> {
    let path = output_root.join(&document.relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let contents = to_pretty_json(&document.body)?;
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Remove a previous output tree. A missing directory is not an error.
pub fn clean_output(output_root: &Path) -> Result<()> {
    if output_root.exists() {
        fs::remove_dir_all(output_root)
            .with_context(|| format!("removing {}", output_root.display()))?;
    }
    Ok(())
}

/// Recursively copy `source` into `dest`, returning how many files were copied.
///
/// Existing files in `dest` are overwritten; directories are merged.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).with_context(|| format!("creating {}", dest.display()))?;
    let mut copied = 0;
    for entry in fs::read_dir(source).with_context(|| format!("reading {}", source.display()))? {
        let entry = entry?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
