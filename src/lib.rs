//! # dirmerge
//!
//! Merge the readable files of a directory tree into one annotated text
//! file, preceded by a tree visualization of everything that was kept.
//!
//! ## Output format
//!
//! ```text
//! project
//! ├── a.txt
//! └── src
//!     └── main.rs
//! <<FILE_START: a.txt>>
//! content of a.txt
//! <<FILE_END: a.txt>>
//!
//! <<FILE_START: src/main.rs>>
//! content of main.rs
//! <<FILE_END: src/main.rs>>
//! ```
//!
//! ## Pipeline
//!
//! 1. **Filter**: walk the root depth-first (children sorted by name),
//!    dropping every entry whose root-relative path or bare name matches an
//!    ignore glob; a matched directory is pruned without descent.
//! 2. **Tree header**: the kept entries are rendered as a tree and written
//!    as the artifact's first block, replacing any previous artifact.
//! 3. **Classify + append**: each kept file that classifies as text is
//!    appended as a `prefix + content + suffix` block in scan order.
//!
//! ## Plugins
//!
//! A [`PluginRegistry`] maps file extensions to validator/reader pairs that
//! override classification and extraction for that extension. It is built
//! once, up front, and stays read-only for the whole merge:
//!
//! ```no_run
//! use dirmerge::{merge, MergeOptions, PluginRegistry, ReaderPlugin};
//! use std::path::Path;
//!
//! let registry = PluginRegistry::from_plugins([ReaderPlugin::new(
//!     ".pdf",
//!     |_path| Ok(true),
//!     |_path| Ok("extracted text".to_string()),
//! )])?;
//!
//! merge(
//!     Path::new("path/to/dir"),
//!     &[".git", "*cache*", "__*__"],
//!     Path::new("output.txt"),
//!     &registry,
//!     &MergeOptions::default(),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod append;
pub mod classify;
pub mod filter;
pub mod merge;
pub mod registry;
pub mod tree;

pub use append::{append_content, AppendOptions, DEFAULT_PREFIX, DEFAULT_SUFFIX};
pub use classify::{is_text_file, ClassifyOptions, DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CONFIDENCE};
pub use filter::{filter_entries, IgnoreSet};
pub use merge::{merge, MergeOptions};
pub use registry::{PluginRegistry, Reader, ReaderPlugin, Validator};
