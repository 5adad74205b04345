//! Variant selection and descriptor assembly for one resolved item.
//!
//! A descriptor is the serialization-ready record for a single attachable. The
//! display flag carried by the mapping picks one of two fixed template
//! families; everything else about the descriptor is either copied from the
//! inputs or shared by every item.

use crate::manifest::MappingRecord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geometry referenced by every attachable.
pub const SHARED_GEOMETRY: &str = "geometry.large_item";
/// Render controller referenced by every attachable.
pub const SHARED_RENDER_CONTROLLER: &str = "controller.render.large_item";

/// Display template family applied to an item.
///
/// Held items use the `_held` animation pair (the pose a tool or weapon takes
/// in hand); everything else uses the standard pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DisplayVariant {
    HeldDisplay,
    StandardDisplay,
}

impl DisplayVariant {
    pub const ALL: [DisplayVariant; 2] =
        [DisplayVariant::HeldDisplay, DisplayVariant::StandardDisplay];

    pub fn from_flag(display_handheld: bool) -> Self {
        if display_handheld {
            DisplayVariant::HeldDisplay
        } else {
            DisplayVariant::StandardDisplay
        }
    }

    /// Template family name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayVariant::HeldDisplay => "held-display",
            DisplayVariant::StandardDisplay => "standard-display",
        }
    }

    pub fn first_person_animation(&self) -> &'static str {
        match self {
            DisplayVariant::HeldDisplay => "animation.large_item.first_person_held",
            DisplayVariant::StandardDisplay => "animation.large_item.first_person",
        }
    }

    pub fn third_person_animation(&self) -> &'static str {
        match self {
            DisplayVariant::HeldDisplay => "animation.large_item.third_person_held",
            DisplayVariant::StandardDisplay => "animation.large_item.third_person",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "held-display" => Some(DisplayVariant::HeldDisplay),
            "standard-display" => Some(DisplayVariant::StandardDisplay),
            _ => None,
        }
    }
}

impl Serialize for DisplayVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DisplayVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value).ok_or_else(|| {
            serde::de::Error::unknown_variant(&value, &["held-display", "standard-display"])
        })
    }
}

/// Animation references stamped onto a descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnimationRefs {
    pub first_person: String,
    pub third_person: String,
}

/// Fully resolved attachable for one item.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub identifier: String,
    pub texture: String,
    pub variant: DisplayVariant,
    pub animations: AnimationRefs,
    pub geometry: String,
    pub render_controller: String,
}

impl Descriptor {
    /// Template family name implied by the variant.
    pub fn family(&self) -> &'static str {
        self.variant.as_str()
    }
}

/// Assemble the descriptor for a matched mapping record.
pub fn build(record: &MappingRecord, texture_path: &str) -> Descriptor {
    let variant = DisplayVariant::from_flag(record.display_handheld);
    Descriptor {
        identifier: record.identifier.clone(),
        texture: texture_path.to_string(),
        variant,
        animations: AnimationRefs {
            first_person: variant.first_person_animation().to_string(),
            third_person: variant.third_person_animation().to_string(),
        },
        geometry: SHARED_GEOMETRY.to_string(),
        render_controller: SHARED_RENDER_CONTROLLER.to_string(),
    }
}
