//! Generates attachables for a resource pack.
//!
//! Reads `textures/item_texture.json` (and the item mappings when present)
//! from the input pack, writes one attachable per resolved item plus the shared
//! geometry, render controller and animation files, and logs a summary. Exits
//! non-zero only when an input manifest is missing or invalid.

use anyhow::Result;
use attachable_forge::{GeneratorArgs, init_logging, pipeline};
use clap::Parser;

#[derive(Parser)]
#[command(name = "generate-attachables")]
#[command(
    about = "Generate Bedrock attachables from a pack's item textures and mappings",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.generator.into_config();
    let report = pipeline::run(&config)?;

    let summary = &report.resolution.summary;
    if !config.dry_run {
        println!(
            "{}: {} attachables written to {} ({} held, {} standard)",
            report.resource_pack_name,
            summary.matched,
            config.output_dir.display(),
            summary.held,
            summary.standard
        );
    }
    if summary.missing > 0 {
        println!("{} mappings had no texture; see warnings above", summary.missing);
    }
    Ok(())
}
