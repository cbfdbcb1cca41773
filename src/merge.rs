//! End-to-end merge pipeline
//!
//! Scan → tree header → classify/append loop. Single-threaded, one pass, no
//! retries: the first unrecovered error aborts and leaves the artifact in
//! whatever partially-written state it reached.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::append::{self, AppendOptions};
use crate::classify::{self, ClassifyOptions};
use crate::filter;
use crate::registry::PluginRegistry;
use crate::tree;

/// Tunables for a merge run; `Default` matches the documented defaults
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Number of leading bytes sampled per file for encoding detection
    pub chunk_size: usize,
    /// Minimum encoding-detection confidence before falling back to UTF-8
    pub min_confidence: f32,
    /// Whether empty files still produce a delimiter block
    pub write_if_empty: bool,
    /// Per-file prefix template with a `{path}` placeholder
    pub prefix: String,
    /// Per-file suffix template with a `{path}` placeholder
    pub suffix: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            chunk_size: classify::DEFAULT_CHUNK_SIZE,
            min_confidence: classify::DEFAULT_MIN_CONFIDENCE,
            write_if_empty: false,
            prefix: append::DEFAULT_PREFIX.to_string(),
            suffix: append::DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Merge every readable file under `root` into the `output` artifact.
///
/// The artifact starts with a tree visualization of all kept entries,
/// followed by one delimited block per text file in scan order. The plugin
/// `registry` supplies per-extension validator/reader overrides and must be
/// fully built before the call; pass [`PluginRegistry::new()`] for default
/// behavior everywhere.
pub fn merge<S: AsRef<str>>(
    root: &Path,
    ignore_patterns: &[S],
    output: &Path,
    registry: &PluginRegistry,
    options: &MergeOptions,
) -> Result<()> {
    let entries = filter::filter_entries(root, ignore_patterns, true)?;

    let header = tree::render(root, &entries);
    fs::write(output, format!("{}\n", header))
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    let classify_options = ClassifyOptions {
        chunk_size: options.chunk_size,
        min_confidence: options.min_confidence,
    };
    let append_options = AppendOptions {
        prefix: options.prefix.clone(),
        suffix: options.suffix.clone(),
        write_if_empty: options.write_if_empty,
    };

    for path in &entries {
        if path.is_dir() {
            continue;
        }
        if !classify::is_text_file(path, registry, &classify_options) {
            continue;
        }
        append::append_content(root, path, output, registry, &append_options)?;
    }

    Ok(())
}
