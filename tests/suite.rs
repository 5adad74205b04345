// Integration suite for the generator: drives full runs against scratch packs
// through the library and through the compiled binaries.
mod support;

use anyhow::Result;
use attachable_forge::config::{INPUT_ENV, MAPPING_MANIFEST_ENV, OUTPUT_ENV, TEXTURE_MANIFEST_ENV};
use attachable_forge::{DisplayVariant, GeneratorConfig, MappingSource, pipeline};
use serde_json::Value;
use std::fs;
use std::process::Command;
use support::{Workspace, generator_binary, join_key_binary, read_json, run_command, write_json};

const SHARED_FILES: &[&str] = &[
    "animations/large_item.animation.json",
    "animations/large_item_held.animation.json",
    "models/entity/large_item.geo.json",
    "render_controllers/large_item.render_controllers.json",
];

fn description(doc: &Value) -> &Value {
    &doc["minecraft:attachable"]["description"]
}

fn generator_command(ws: &Workspace) -> Command {
    let mut cmd = Command::new(generator_binary());
    for var in [INPUT_ENV, OUTPUT_ENV, TEXTURE_MANIFEST_ENV, MAPPING_MANIFEST_ENV] {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd.arg("--input")
        .arg(ws.input())
        .arg("--output")
        .arg(ws.output());
    cmd
}

// The canonical single-item example: dotted atlas key joined to a slashed
// mapping identifier, standard display, no misses.
#[test]
fn sword_resolves_from_mappings() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_sword", "textures/ns/sword")])?;
    ws.write_mappings("mappings.json", &[("ns:item/sword", false)])?;

    let config = GeneratorConfig::new(ws.input(), ws.output());
    let report = pipeline::run(&config)?;

    assert_eq!(report.resource_pack_name, "fixture_pack");
    assert_eq!(report.resolution.summary.matched, 1);
    assert!(report.resolution.misses.is_empty());
    let descriptor = &report.resolution.descriptors[0];
    assert_eq!(descriptor.identifier, "ns:item/sword");
    assert_eq!(descriptor.texture, "textures/ns/sword");
    assert_eq!(descriptor.variant, DisplayVariant::StandardDisplay);

    let attachable = read_json(&ws.output().join("attachables/ns_item_sword.json"))?;
    let description = description(&attachable);
    assert_eq!(attachable["format_version"], "1.10.0");
    assert_eq!(description["identifier"], "ns:item/sword");
    assert_eq!(description["textures"]["default"], "textures/ns/sword");
    assert_eq!(
        description["animations"]["third_person"],
        "animation.large_item.third_person"
    );
    for shared in SHARED_FILES {
        assert!(ws.output().join(shared).is_file(), "{shared} not written");
    }
    assert_eq!(report.written.len(), 1 + SHARED_FILES.len());
    Ok(())
}

#[test]
fn held_and_standard_items_pick_their_families() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[
        ("ns.item_hammer", "textures/ns/hammer"),
        ("ns.items_gem", "textures/ns/gem"),
    ])?;
    ws.write_mappings(
        "geyser_mappings.json",
        &[("ns:item/hammer", true), ("ns:items/gem", false)],
    )?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    let summary = report.resolution.summary;
    assert_eq!((summary.held, summary.standard), (1, 1));

    let hammer = read_json(&ws.output().join("attachables/ns_item_hammer.json"))?;
    assert_eq!(
        description(&hammer)["animations"]["first_person"],
        "animation.large_item.first_person_held"
    );
    let gem = read_json(&ws.output().join("attachables/ns_items_gem.json"))?;
    assert_eq!(
        description(&gem)["animations"]["first_person"],
        "animation.large_item.first_person"
    );

    let held_animations =
        read_json(&ws.output().join("animations/large_item_held.animation.json"))?;
    assert!(
        held_animations["animations"]
            .get("animation.large_item.third_person_held")
            .is_some()
    );
    Ok(())
}

// Misses are collected and reported; every other mapping still produces a file.
#[test]
fn unmatched_mappings_do_not_stop_the_run() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a"), ("ns.item_c", "textures/c")])?;
    ws.write_mappings(
        "mappings.json",
        &[
            ("ns:item/a", false),
            ("ns:item/b", true),
            ("ns:item/c", true),
            ("no_namespace", false),
        ],
    )?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    let resolution = &report.resolution;
    assert_eq!(resolution.descriptors.len() + resolution.misses.len(), 4);
    let missed: Vec<_> = resolution
        .misses
        .iter()
        .map(|miss| miss.identifier.as_str())
        .collect();
    assert_eq!(missed, ["ns:item/b", "no_namespace"]);
    assert!(ws.output().join("attachables/ns_item_c.json").is_file());
    assert!(!ws.output().join("attachables/ns_item_b.json").exists());
    Ok(())
}

#[test]
fn duplicate_atlas_keys_keep_the_last_texture() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[
        ("ns.item_gem", "textures/old_gem"),
        ("ns:item/gem", "textures/new_gem"),
    ])?;
    ws.write_mappings("mappings.json", &[("ns:item/gem", false)])?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    assert_eq!(report.resolution.duplicates.len(), 1);
    let gem = read_json(&ws.output().join("attachables/ns_item_gem.json"))?;
    assert_eq!(description(&gem)["textures"]["default"], "textures/new_gem");
    Ok(())
}

// Without a mappings file every atlas entry becomes a standard attachable,
// named after its canonical identifier.
#[test]
fn texture_only_mode_attaches_every_atlas_entry() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[
        ("kangelitem.item_power_supply", "textures/items/power_supply"),
        ("namespace.items_diamond", "textures/items/diamond"),
        ("namespace:items/diamond", "textures/items/diamond_v2"),
    ])?;

    let config = GeneratorConfig::new(ws.input(), ws.output());
    assert_eq!(config.mappings, MappingSource::TextureKeys);
    let report = pipeline::run(&config)?;

    assert_eq!(report.resolution.summary.matched, 2);
    assert_eq!(report.resolution.summary.standard, 2);
    let supply = read_json(&ws.output().join("attachables/kangelitem_item_power_supply.json"))?;
    assert_eq!(
        description(&supply)["identifier"],
        "kangelitem:item/power_supply"
    );
    let diamond = read_json(&ws.output().join("attachables/namespace_items_diamond.json"))?;
    assert_eq!(
        description(&diamond)["textures"]["default"],
        "textures/items/diamond_v2"
    );
    Ok(())
}

#[test]
fn texture_only_mode_with_empty_atlas_fails() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[])?;
    let err = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))
        .expect_err("nothing to process");
    assert!(err.to_string().contains("No items found"), "{err:#}");
    assert!(!ws.output().exists());
    Ok(())
}

// A mappings file with no definitions is legitimate input: shared documents
// are still written.
#[test]
fn empty_mappings_still_write_shared_documents() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a")])?;
    ws.write_mappings("mappings.json", &[])?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    assert_eq!(report.resolution.summary.total(), 0);
    assert_eq!(report.written.len(), SHARED_FILES.len());
    Ok(())
}

#[test]
fn missing_texture_manifest_is_fatal() -> Result<()> {
    let ws = Workspace::new()?;
    let err = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))
        .expect_err("no atlas");
    assert!(format!("{err:#}").contains("item_texture.json"), "{err:#}");
    Ok(())
}

#[test]
fn dry_run_writes_nothing() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a")])?;
    let mut config = GeneratorConfig::new(ws.input(), ws.output());
    config.dry_run = true;

    let report = pipeline::run(&config)?;
    assert_eq!(report.resolution.summary.matched, 1);
    assert!(report.written.is_empty());
    assert!(!ws.output().exists());
    Ok(())
}

#[test]
fn clean_and_copy_rebuild_the_output_pack() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a")])?;
    fs::write(ws.input().join("manifest.json"), "{}")?;
    fs::create_dir_all(ws.output())?;
    fs::write(ws.output().join("stale.json"), "{}")?;

    let mut config = GeneratorConfig::new(ws.input(), ws.output());
    config.clean_output = true;
    config.copy_input = true;
    let report = pipeline::run(&config)?;

    assert!(!ws.output().join("stale.json").exists());
    assert!(ws.output().join("manifest.json").is_file());
    assert!(ws.output().join("textures/item_texture.json").is_file());
    assert!(ws.output().join("attachables/ns_item_a.json").is_file());
    assert_eq!(report.copied_files, 2);
    Ok(())
}

#[test]
fn invalid_mappings_fail_before_touching_output() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a")])?;
    write_json(
        &ws.input().join("mappings.json"),
        &serde_json::json!({"items": {"minecraft:stick": "ns:item/a"}}),
    )?;
    let mut config = GeneratorConfig::new(ws.input(), ws.output());
    config.copy_input = true;

    let err = pipeline::run(&config).expect_err("schema violation");
    assert!(format!("{err:#}").contains("failed schema validation"), "{err:#}");
    assert!(!ws.output().exists());
    Ok(())
}

// Entries the resolver cannot use are skipped with a warning; the rest of the
// manifest still generates.
#[test]
fn unusable_definitions_are_skipped_not_fatal() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a"), ("ns.item_b", "textures/b")])?;
    write_json(
        &ws.input().join("mappings.json"),
        &serde_json::json!({
            "items": {
                "minecraft:stick": [
                    {"type": "definition", "model": "ns:item/unnamed"},
                    {"type": "definition", "bedrock_identifier": "ns:item/a",
                     "bedrock_options": {"display_handheld": null}},
                    {"type": "definition", "bedrock_identifier": "ns:item/b",
                     "bedrock_options": {"display_handheld": 1.5}}
                ]
            }
        }),
    )?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    let summary = &report.resolution.summary;
    assert_eq!((summary.matched, summary.missing), (2, 0));
    let a = read_json(&ws.output().join("attachables/ns_item_a.json"))?;
    let b = read_json(&ws.output().join("attachables/ns_item_b.json"))?;
    assert_eq!(
        description(&a)["animations"]["first_person"],
        DisplayVariant::StandardDisplay.first_person_animation()
    );
    assert_eq!(
        description(&b)["animations"]["first_person"],
        DisplayVariant::HeldDisplay.first_person_animation()
    );
    Ok(())
}

// A dotted atlas key whose segment carries a colon still meets the matching
// colon-form identifier.
#[test]
fn mixed_delimiter_keys_join() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a:b", "textures/ab")])?;
    ws.write_mappings("mappings.json", &[("ns:item/a:b", false)])?;

    let report = pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;
    assert!(report.resolution.misses.is_empty());
    let doc = read_json(&ws.output().join("attachables/ns_item_a_b.json"))?;
    assert_eq!(description(&doc)["textures"]["default"], "textures/ab");
    Ok(())
}

#[test]
fn written_documents_use_four_space_indent() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[("ns.item_a", "textures/a")])?;
    pipeline::run(&GeneratorConfig::new(ws.input(), ws.output()))?;

    let text = fs::read_to_string(ws.output().join("attachables/ns_item_a.json"))?;
    assert!(text.starts_with("{\n    \"format_version\": \"1.10.0\""), "{text}");
    Ok(())
}

#[test]
fn generator_binary_reports_summary() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_textures(&[
        ("ns.item_sword", "textures/ns/sword"),
        ("ns.item_axe", "textures/ns/axe"),
    ])?;
    let mappings = ws.write_mappings(
        "custom/items.json",
        &[("ns:item/sword", true), ("ns:item/axe", false), ("ns:item/bow", false)],
    )?;

    let mut cmd = generator_command(&ws);
    cmd.arg("--mappings").arg(&mappings);
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fixture_pack: 2 attachables written"), "{stdout}");
    assert!(stdout.contains("(1 held, 1 standard)"), "{stdout}");
    assert!(stdout.contains("1 mappings had no texture"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ns:item/bow"), "{stderr}");
    assert!(ws.output().join("attachables/ns_item_sword.json").is_file());
    Ok(())
}

#[test]
fn generator_binary_exits_non_zero_on_missing_input() -> Result<()> {
    let ws = Workspace::new()?;
    fs::remove_dir_all(ws.input())?;
    let output = generator_command(&ws).output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input directory"), "{stderr}");
    Ok(())
}

#[test]
fn join_key_binary_prints_canonical_keys() -> Result<()> {
    let mut cmd = Command::new(join_key_binary());
    cmd.arg("--file-stem")
        .arg("ns.item_item_bar")
        .arg("ns:items/gem")
        .arg("bare");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "ns.item_item_bar\tns:item/item_bar\tns_item_item_bar",
            "ns:items/gem\tns:items/gem\tns_items_gem",
            "bare\tbare\tbare",
        ]
    );
    Ok(())
}
