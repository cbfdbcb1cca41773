//! Glob-based filtering of directory trees
//!
//! Every entry is matched twice: once against its path relative to the scan
//! root (forward slashes on every platform) and once against its bare name.
//! A match on either excludes the entry, and an excluded directory is pruned
//! without descending into it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

/// A compiled set of shell-glob ignore patterns
pub struct IgnoreSet {
    globs: GlobSet,
}

impl IgnoreSet {
    /// Compile a list of glob patterns (`*`, `?`, `[...]`, case-sensitive)
    /// A trailing path separator is stripped before compilation.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let trimmed = pattern.as_ref().trim_end_matches(|c| c == '/' || c == '\\');
            let glob = Glob::new(trimmed)
                .with_context(|| format!("Invalid ignore pattern: {}", pattern.as_ref()))?;
            builder.add(glob);
        }
        let globs = builder.build().context("Failed to compile ignore patterns")?;
        Ok(Self { globs })
    }

    /// Whether `path` is excluded, judged relative to `root`
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        let relative = match path.strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => return false,
        };

        let posix = relative.to_string_lossy().replace('\\', "/");
        if self.globs.is_match(&posix) {
            return true;
        }

        match path.file_name() {
            Some(name) => self.globs.is_match(Path::new(name)),
            None => false,
        }
    }
}

/// Enumerate all entries under `root` that no ignore pattern excludes.
///
/// Directories and files are both returned, depth-first, with each
/// directory's children in lexicographic order so the result is
/// deterministic across platforms. Kept directories are descended into
/// when `recursive` is set; excluded directories are pruned entirely.
///
/// Fails if `root` is not an existing directory or if any directory on the
/// way cannot be enumerated. No partial result is returned on error.
pub fn filter_entries<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let ignore = IgnoreSet::new(patterns)?;
    let max_depth = if recursive { usize::MAX } else { 1 };

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !ignore.matches(root, entry.path()));

    let mut entries = Vec::new();
    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to scan directory: {}", root.display()))?;
        entries.push(entry.into_path());
    }
    Ok(entries)
}
