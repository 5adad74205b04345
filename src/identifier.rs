//! Canonical join keys shared by the texture atlas and the item mappings.
//!
//! Texture atlas keys are written `namespace.item_name` while mapping
//! identifiers are written `namespace:item/name`. Both sides go through
//! [`to_join_key`] so the table build and the per-record lookup can never
//! drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

const CANONICAL_DELIMITER: char = ':';
const DOTTED_DELIMITER: char = '.';

// (accepted spellings, canonical spelling); `items` must not be shadowed by
// `item`, which holds because the fifth character differs.
const SEGMENT_PREFIXES: &[(&[&str], &str)] = &[
    (&["item_", "item/"], "item/"),
    (&["items_", "items/"], "items/"),
];

/// Canonical form used to match a texture key to a mapping identifier.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinKey(pub String);

impl JoinKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a texture key or a target identifier.
///
/// Input is split at its first `:` or `.`, whichever comes first. The
/// namespace is kept verbatim, the delimiter becomes `:` and a leading
/// `item_`/`items_` (or slash spelling) becomes `item/`/`items/`. Input without
/// any delimiter comes back unchanged. Applying this twice is a no-op.
pub fn to_join_key(raw: &str) -> JoinKey {
    let Some((namespace, segment)) = split_namespace(raw) else {
        return JoinKey(raw.to_string());
    };
    let segment = normalize_segment_prefix(segment);
    JoinKey(format!("{namespace}{CANONICAL_DELIMITER}{segment}"))
}

/// Filesystem-safe stem for the attachable written for `identifier`.
///
/// `ns:item/sword` becomes `ns_item_sword`.
pub fn file_stem(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

// Whichever delimiter comes first separates the namespace; the segment may
// contain either.
fn split_namespace(raw: &str) -> Option<(&str, &str)> {
    let at = raw.find([CANONICAL_DELIMITER, DOTTED_DELIMITER])?;
    Some((&raw[..at], &raw[at + 1..]))
}

fn normalize_segment_prefix(segment: &str) -> String {
    for (spellings, canonical) in SEGMENT_PREFIXES {
        for spelling in *spellings {
            if let Some(rest) = segment.strip_prefix(spelling) {
                return format!("{canonical}{rest}");
            }
        }
    }
    segment.to_string()
}
