//! Appending extracted file content to the output artifact
//!
//! Each included file becomes one `prefix + content + suffix` block, written
//! with a single write call on a freshly opened append-mode handle. Unlike
//! classification, extraction failures are not swallowed: a reader error,
//! a non-UTF-8 default read, or a write failure aborts the merge.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::registry::PluginRegistry;

pub const DEFAULT_PREFIX: &str = "<<FILE_START: {path}>>\n";
pub const DEFAULT_SUFFIX: &str = "\n<<FILE_END: {path}>>\n\n";

/// Block formatting and empty-file handling
#[derive(Debug, Clone)]
pub struct AppendOptions {
    /// Prefix template; `{path}` is replaced with the root-relative path
    pub prefix: String,
    /// Suffix template; `{path}` is replaced with the root-relative path
    pub suffix: String,
    /// Whether files whose extracted content is empty still produce a block
    pub write_if_empty: bool,
}

impl Default for AppendOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            write_if_empty: false,
        }
    }
}

/// Extract the text of `path` and append its delimited block to `output`.
///
/// A reader registered for the path's extension supplies the content;
/// otherwise the whole file is read as strict UTF-8. Empty content writes
/// nothing unless `write_if_empty` is set.
pub fn append_content(
    root: &Path,
    path: &Path,
    output: &Path,
    registry: &PluginRegistry,
    options: &AppendOptions,
) -> Result<()> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", path.display(), root.display()))?;
    let shown = relative.display().to_string();

    let content = match registry.reader_for(path) {
        Some(reader) => {
            reader(path).with_context(|| format!("Plugin reader failed: {}", path.display()))?
        }
        None => fs::read_to_string(path)
            .with_context(|| format!("Failed to read as UTF-8: {}", path.display()))?,
    };

    if content.is_empty() && !options.write_if_empty {
        return Ok(());
    }

    let prefix = options.prefix.replace("{path}", &shown);
    let suffix = options.suffix.replace("{path}", &shown);
    let block = format!("{}{}{}", prefix, content, suffix);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .with_context(|| format!("Failed to open output: {}", output.display()))?;
    file.write_all(block.as_bytes())
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ReaderPlugin;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup(content: &[u8]) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, content).unwrap();
        let output = dir.path().join("out.txt");
        fs::write(&output, "").unwrap();
        (dir, file, output)
    }

    #[test]
    fn test_block_is_prefix_content_suffix() {
        let (dir, file, output) = setup(b"hello");
        append_content(
            dir.path(),
            &file,
            &output,
            &PluginRegistry::new(),
            &AppendOptions::default(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<<FILE_START: a.txt>>\nhello\n<<FILE_END: a.txt>>\n\n"
        );
    }

    #[test]
    fn test_appends_after_existing_content() {
        let (dir, file, output) = setup(b"hello");
        fs::write(&output, "tree\n").unwrap();
        append_content(
            dir.path(),
            &file,
            &output,
            &PluginRegistry::new(),
            &AppendOptions::default(),
        )
        .unwrap();

        assert!(fs::read_to_string(&output)
            .unwrap()
            .starts_with("tree\n<<FILE_START: a.txt>>\n"));
    }

    #[test]
    fn test_custom_templates() {
        let (dir, file, output) = setup(b"hi");
        let options = AppendOptions {
            prefix: "### {path} ###\n".to_string(),
            suffix: "\n".to_string(),
            ..Default::default()
        };
        append_content(dir.path(), &file, &output, &PluginRegistry::new(), &options).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "### a.txt ###\nhi\n");
    }

    #[test]
    fn test_empty_content_is_skipped_by_default() {
        let (dir, file, output) = setup(b"");
        append_content(
            dir.path(),
            &file,
            &output,
            &PluginRegistry::new(),
            &AppendOptions::default(),
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_write_if_empty_emits_bare_delimiters() {
        let (dir, file, output) = setup(b"");
        let options = AppendOptions {
            write_if_empty: true,
            ..Default::default()
        };
        append_content(dir.path(), &file, &output, &PluginRegistry::new(), &options).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<<FILE_START: a.txt>>\n\n<<FILE_END: a.txt>>\n\n"
        );
    }

    #[test]
    fn test_reader_override_supplies_content() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.pdf");
        fs::write(&file, [0xFF, 0xD8]).unwrap();
        let output = dir.path().join("out.txt");
        fs::write(&output, "").unwrap();

        let registry = PluginRegistry::from_plugins([ReaderPlugin::new(
            ".pdf",
            |_| Ok(true),
            |_| Ok("PDF-TEXT".to_string()),
        )])
        .unwrap();
        append_content(
            dir.path(),
            &file,
            &output,
            &registry,
            &AppendOptions::default(),
        )
        .unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("PDF-TEXT"));
    }

    #[test]
    fn test_reader_error_propagates() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.pdf");
        fs::write(&file, "x").unwrap();
        let output = dir.path().join("out.txt");
        fs::write(&output, "").unwrap();

        let registry = PluginRegistry::from_plugins([ReaderPlugin::new(
            ".pdf",
            |_| Ok(true),
            |_| anyhow::bail!("page table truncated"),
        )])
        .unwrap();
        let result = append_content(
            dir.path(),
            &file,
            &output,
            &registry,
            &AppendOptions::default(),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("doc.pdf"));
    }

    #[test]
    fn test_default_read_of_non_utf8_propagates() {
        let (dir, file, output) = setup(&[0xFF, 0xFE, 0x00, 0x93]);
        let result = append_content(
            dir.path(),
            &file,
            &output,
            &PluginRegistry::new(),
            &AppendOptions::default(),
        );
        assert!(result.is_err());
    }
}
