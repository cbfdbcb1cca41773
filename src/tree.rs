//! Tree visualization of the entries kept by a scan
//!
//! Renders the classic box-drawing layout from a flat, depth-first entry
//! list. The result becomes the first block of the output artifact; the
//! merge pipeline only depends on `render`'s signature, so an alternative
//! renderer can be swapped in at that call site.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Render `entries` (absolute paths under `root`, in scan order) as a tree.
///
/// Entries outside `root` are ignored. The first line is the root's own
/// name; children keep the order they appear in `entries`.
pub fn render(root: &Path, entries: &[PathBuf]) -> String {
    let mut children: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    for entry in entries {
        let relative = match entry.strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let parent = relative
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        children.entry(parent).or_default().push(relative);
    }

    let mut out = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    render_level(&children, Path::new(""), "", &mut out);
    out
}

fn render_level(
    children: &HashMap<PathBuf, Vec<PathBuf>>,
    dir: &Path,
    indent: &str,
    out: &mut String,
) {
    let Some(entries) = children.get(dir) else {
        return;
    };

    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == entries.len();
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        out.push('\n');
        out.push_str(indent);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&name);

        let child_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
        render_level(children, entry, &child_indent, out);
    }
}
