//! Joins mapping records against the texture atlas.
//!
//! The table is built once per run from the atlas and only read afterwards.
//! Every mapping record ends up either as a descriptor or as a miss report, in
//! input order; a miss never stops the batch.

use crate::descriptor::{self, Descriptor, DisplayVariant};
use crate::identifier::{JoinKey, to_join_key};
use crate::manifest::{MappingRecord, TextureRecord};
use serde::Serialize;
use std::collections::HashMap;

/// A mapping record whose join key has no texture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MissReport {
    pub identifier: String,
    pub join_key: JoinKey,
}

/// A texture key that canonicalized onto an earlier one and replaced it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DuplicateKey {
    pub join_key: JoinKey,
    pub replaced: TextureRecord,
    pub kept: TextureRecord,
}

/// Aggregate counts for one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub matched: usize,
    pub missing: usize,
    pub held: usize,
    pub standard: usize,
}

impl GenerationSummary {
    fn record_match(&mut self, variant: DisplayVariant) {
        self.matched += 1;
        match variant {
            DisplayVariant::HeldDisplay => self.held += 1,
            DisplayVariant::StandardDisplay => self.standard += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.missing
    }
}

/// Join key -> texture lookup built from the atlas.
///
/// Later records win when two keys canonicalize to the same join key; each
/// overwrite is kept in [`TextureTable::duplicates`].
#[derive(Debug, Default)]
pub struct TextureTable {
    by_key: HashMap<JoinKey, TextureRecord>,
    duplicates: Vec<DuplicateKey>,
}

impl TextureTable {
    pub fn build(records: &[TextureRecord]) -> Self {
        let mut table = TextureTable::default();
        for record in records {
            table.insert(record.clone());
        }
        table
    }

    fn insert(&mut self, record: TextureRecord) {
        let join_key = to_join_key(&record.key);
        if let Some(replaced) = self.by_key.insert(join_key.clone(), record.clone()) {
            self.duplicates.push(DuplicateKey {
                join_key,
                replaced,
                kept: record,
            });
        }
    }

    /// Texture path stored for `key`.
    pub fn lookup(&self, key: &JoinKey) -> Option<&str> {
        self.by_key.get(key).map(|record| record.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}

/// Everything one resolver pass produced.
#[derive(Debug, Default)]
pub struct Resolution {
    pub descriptors: Vec<Descriptor>,
    pub misses: Vec<MissReport>,
    pub summary: GenerationSummary,
    pub duplicates: Vec<DuplicateKey>,
}

/// Resolve every mapping record against the atlas.
pub fn resolve(mappings: &[MappingRecord], textures: &[TextureRecord]) -> Resolution {
    let table = TextureTable::build(textures);
    let mut resolution = resolve_with_table(mappings, &table);
    resolution.duplicates = table.duplicates;
    resolution
}

/// Resolve against a table the caller already built.
pub fn resolve_with_table(mappings: &[MappingRecord], table: &TextureTable) -> Resolution {
    let mut resolution = Resolution::default();
    for record in mappings {
        let join_key = to_join_key(&record.identifier);
        match table.lookup(&join_key) {
            Some(texture_path) => {
                let built = descriptor::build(record, texture_path);
                resolution.summary.record_match(built.variant);
                resolution.descriptors.push(built);
            }
            None => {
                resolution.summary.missing += 1;
                resolution.misses.push(MissReport {
                    identifier: record.identifier.clone(),
                    join_key,
                });
            }
        }
    }
    resolution
}
