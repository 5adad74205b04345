use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch workspace holding an `input/` pack and an `output/` target.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("allocating scratch workspace")?;
        fs::create_dir_all(dir.path().join("input/textures"))?;
        Ok(Self { dir })
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("input")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    /// Write `textures/item_texture.json` from (key, path) pairs, in order.
    pub fn write_textures(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut texture_data = serde_json::Map::new();
        for (key, path) in entries {
            texture_data.insert((*key).to_string(), json!({ "textures": path }));
        }
        write_json(
            &self.input().join("textures/item_texture.json"),
            &json!({
                "resource_pack_name": "fixture_pack",
                "texture_name": "atlas.items",
                "texture_data": texture_data,
            }),
        )
    }

    /// Write a mappings file named `name` under the input directory.
    pub fn write_mappings(&self, name: &str, definitions: &[(&str, bool)]) -> Result<PathBuf> {
        let entries: Vec<Value> = definitions
            .iter()
            .map(|(identifier, held)| {
                json!({
                    "type": "definition",
                    "model": "fixture:item/model",
                    "bedrock_identifier": identifier,
                    "bedrock_options": {"display_handheld": held}
                })
            })
            .collect();
        let path = self.input().join(name);
        write_json(
            &path,
            &json!({
                "format_version": 2,
                "items": {"minecraft:stick": entries}
            }),
        )?;
        Ok(path)
    }
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("writing fixture {}", path.display()))
}

pub fn read_json(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn generator_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_generate-attachables"))
}

pub fn join_key_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_join-key"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
