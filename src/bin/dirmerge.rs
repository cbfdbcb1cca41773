//! dirmerge CLI
//!
//! Merge a directory tree into a single annotated text file.

use anyhow::{Context, Result};
use clap::Parser;
use dirmerge::{merge, MergeOptions, PluginRegistry, DEFAULT_PREFIX, DEFAULT_SUFFIX};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dirmerge")]
#[command(version)]
#[command(about = "Merge the readable files of a directory tree into one text file")]
struct Cli {
    /// Directory to merge
    root: PathBuf,

    /// Output file
    #[arg(short = 'o', long, default_value = "output.txt")]
    output: PathBuf,

    /// Glob pattern to exclude (repeatable); matched against the
    /// root-relative path and the bare name
    #[arg(short = 'i', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Minimum encoding-detection confidence before falling back to UTF-8
    #[arg(long, default_value_t = 0.8)]
    min_confidence: f32,

    /// Include files whose content is empty
    #[arg(long)]
    write_if_empty: bool,

    /// Per-file prefix template; {path} is replaced with the relative path
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Per-file suffix template; {path} is replaced with the relative path
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = MergeOptions {
        min_confidence: cli.min_confidence,
        write_if_empty: cli.write_if_empty,
        prefix: cli.prefix,
        suffix: cli.suffix,
        ..Default::default()
    };

    // Custom readers are a host-program concern; the CLI merges with
    // default classification and extraction only.
    let registry = PluginRegistry::new();

    merge(
        &cli.root,
        &cli.ignore_patterns,
        &cli.output,
        &registry,
        &options,
    )
    .with_context(|| format!("Failed to merge: {}", cli.root.display()))?;

    if cli.verbose {
        let size = std::fs::metadata(&cli.output).map(|m| m.len()).unwrap_or(0);
        println!("Merged: {} ({} bytes)", cli.output.display(), size);
    }

    Ok(())
}
