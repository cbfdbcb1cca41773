//! Text/binary classification
//!
//! A file counts as text when a registered validator for its extension says
//! so, or when its leading bytes decode under the detected (or fallback
//! UTF-8) encoding. This is a sampling heuristic: a file whose first chunk
//! is unrepresentative can be misclassified.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use encoding_rs::{Encoding, UTF_8};

use crate::registry::PluginRegistry;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

/// Knobs for the sampling heuristic
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Number of leading bytes sampled for encoding detection
    pub chunk_size: usize,
    /// Detection confidence below this falls back to UTF-8
    pub min_confidence: f32,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Determine whether `path` is a readable text file.
///
/// A validator registered for the path's extension decides alone; its errors
/// map to `false`. Without an override the leading `chunk_size` bytes are
/// sampled and any detection, decode, or I/O failure means "not text".
pub fn is_text_file(path: &Path, registry: &PluginRegistry, options: &ClassifyOptions) -> bool {
    if let Some(validator) = registry.validator_for(path) {
        return validator(path).unwrap_or(false);
    }

    sample_decodes_as_text(path, options).unwrap_or(false)
}

/// Read a leading chunk and check it decodes under the detected encoding
fn sample_decodes_as_text(path: &Path, options: &ClassifyOptions) -> Result<bool> {
    let file = File::open(path)?;
    let mut chunk = Vec::with_capacity(options.chunk_size);
    file.take(options.chunk_size as u64).read_to_end(&mut chunk)?;

    let (label, confidence, _language) = chardet::detect(&chunk);
    let encoding = if label.is_empty() || confidence < options.min_confidence {
        UTF_8
    } else {
        Encoding::for_label(label.as_bytes()).unwrap_or(UTF_8)
    };

    if encoding == UTF_8 {
        // strict check; encoding_rs would substitute replacement characters
        Ok(std::str::from_utf8(&chunk).is_ok())
    } else {
        let (_decoded, _encoding, had_errors) = encoding.decode(&chunk);
        Ok(!had_errors)
    }
}
