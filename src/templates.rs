//! Bedrock documents emitted for a generation run.
//!
//! Four documents are shared by every attachable: the render controller, the
//! geometry, and one animation file per display family. Each descriptor adds
//! one attachable document that points at them by name.

use crate::descriptor::{Descriptor, DisplayVariant, SHARED_GEOMETRY, SHARED_RENDER_CONTROLLER};
use crate::identifier::file_stem;
use serde_json::{Value, json};
use std::path::PathBuf;

pub const ATTACHABLES_DIR: &str = "attachables";
pub const ANIMATIONS_DIR: &str = "animations";
pub const MODELS_DIR: &str = "models/entity";
pub const RENDER_CONTROLLERS_DIR: &str = "render_controllers";

const ENCHANTED_GLINT_TEXTURE: &str = "textures/misc/enchanted_item_glint";
const HAND_BONE: &str = "rightitem";

/// A document plus where it lives relative to the output root.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub relative_path: PathBuf,
    pub body: Value,
}

/// Attachable definition for one descriptor.
pub fn attachable_document(descriptor: &Descriptor) -> Document {
    let body = json!({
        "format_version": "1.10.0",
        "minecraft:attachable": {
            "description": {
                "identifier": descriptor.identifier,
                "materials": {
                    "default": "entity_alphatest",
                    "enchanted": "entity_alphatest_glint"
                },
                "textures": {
                    "default": descriptor.texture,
                    "enchanted": ENCHANTED_GLINT_TEXTURE
                },
                "geometry": {
                    "default": descriptor.geometry
                },
                "animations": {
                    "first_person": descriptor.animations.first_person,
                    "third_person": descriptor.animations.third_person
                },
                "scripts": {
                    "animate": [
                        {"first_person": "c.is_first_person"},
                        {"third_person": "!c.is_first_person"}
                    ]
                },
                "render_controllers": [descriptor.render_controller]
            }
        }
    });
    Document {
        relative_path: PathBuf::from(ATTACHABLES_DIR)
            .join(format!("{}.json", file_stem(&descriptor.identifier))),
        body,
    }
}

/// The documents every run writes regardless of which items resolved.
pub fn shared_documents() -> Vec<Document> {
    let mut documents = vec![render_controller_document(), geometry_document()];
    documents.extend(DisplayVariant::ALL.iter().map(animation_document));
    documents
}

fn render_controller_document() -> Document {
    Document {
        relative_path: PathBuf::from(RENDER_CONTROLLERS_DIR)
            .join("large_item.render_controllers.json"),
        body: json!({
            "format_version": "1.8.0",
            "render_controllers": {
                SHARED_RENDER_CONTROLLER: {
                    "geometry": "Geometry.default",
                    "materials": [
                        {"*": "variable.is_enchanted ? Material.enchanted : Material.default"}
                    ],
                    "textures": ["Texture.default", "Texture.enchanted"]
                }
            }
        }),
    }
}

fn geometry_document() -> Document {
    Document {
        relative_path: PathBuf::from(MODELS_DIR).join("large_item.geo.json"),
        body: json!({
            "format_version": "1.16.0",
            "minecraft:geometry": [
                {
                    "description": {
                        "identifier": SHARED_GEOMETRY,
                        "texture_width": 16,
                        "texture_height": 16,
                        "visible_bounds_width": 2,
                        "visible_bounds_height": 1.5,
                        "visible_bounds_offset": [0, 0.25, 0]
                    },
                    "bones": [
                        {
                            "name": HAND_BONE,
                            "pivot": [0, 0, 0],
                            "texture_meshes": [
                                {
                                    "texture": "default",
                                    "position": [0, 0, 0],
                                    "local_pivot": [8, 0, 8]
                                }
                            ]
                        }
                    ]
                }
            ]
        }),
    }
}

/// Hand-bone transform for one camera perspective.
struct Pose {
    position: [f64; 3],
    rotation: [f64; 3],
    scale: f64,
}

impl Pose {
    fn to_animation(&self) -> Value {
        json!({
            "loop": true,
            "bones": {
                HAND_BONE: {
                    "position": self.position,
                    "rotation": self.rotation,
                    "scale": [self.scale, self.scale, self.scale]
                }
            }
        })
    }
}

fn poses(variant: DisplayVariant) -> (Pose, Pose) {
    match variant {
        DisplayVariant::StandardDisplay => (
            Pose {
                position: [-6.0, 0.0, -1.0],
                rotation: [45.0, -15.0, 30.0],
                scale: 1.0,
            },
            Pose {
                position: [1.0, -1.0, -6.0],
                rotation: [15.0, 0.0, -165.0],
                scale: 0.5,
            },
        ),
        // Tools and weapons stand upright in the hand and read larger.
        DisplayVariant::HeldDisplay => (
            Pose {
                position: [-4.0, 2.0, 0.0],
                rotation: [30.0, -30.0, 20.0],
                scale: 1.2,
            },
            Pose {
                position: [0.0, 2.0, -7.0],
                rotation: [-30.0, 0.0, -180.0],
                scale: 0.8,
            },
        ),
    }
}

fn animation_file_name(variant: DisplayVariant) -> &'static str {
    match variant {
        DisplayVariant::StandardDisplay => "large_item.animation.json",
        DisplayVariant::HeldDisplay => "large_item_held.animation.json",
    }
}

fn animation_document(variant: &DisplayVariant) -> Document {
    let (first_person, third_person) = poses(*variant);
    let mut animations = serde_json::Map::new();
    animations.insert(
        variant.first_person_animation().to_string(),
        first_person.to_animation(),
    );
    animations.insert(
        variant.third_person_animation().to_string(),
        third_person.to_animation(),
    );
    Document {
        relative_path: PathBuf::from(ANIMATIONS_DIR).join(animation_file_name(*variant)),
        body: json!({
            "format_version": "1.10.0",
            "animations": animations
        }),
    }
}
