//! Prints the join key for texture keys or item identifiers.
//!
//! Handy when a mapping refuses to match: run it on both spellings and compare.
//! Reads identifiers from the arguments, or one per line from stdin when none
//! are given. With `--file-stem` the attachable file stem is printed as well.

use anyhow::{Context, Result};
use attachable_forge::{file_stem, to_join_key};
use clap::Parser;
use std::io::{self, BufRead};

#[derive(Parser)]
#[command(name = "join-key")]
#[command(
    about = "Print canonical join keys for texture keys or item identifiers",
    long_about = None
)]
struct Cli {
    /// Keys or identifiers to canonicalize
    identifiers: Vec<String>,

    /// Also print the attachable file stem
    #[arg(long)]
    file_stem: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if !cli.identifiers.is_empty() {
        for raw in &cli.identifiers {
            print_key(raw, cli.file_stem);
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading identifiers from stdin")?;
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        print_key(raw, cli.file_stem);
    }
    Ok(())
}

fn print_key(raw: &str, with_stem: bool) {
    let key = to_join_key(raw);
    if with_stem {
        println!("{raw}\t{key}\t{}", file_stem(key.as_str()));
    } else {
        println!("{raw}\t{key}");
    }
}
