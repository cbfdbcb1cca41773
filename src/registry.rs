//! Extension-keyed validator/reader plugin registry
//!
//! Plugins are registered explicitly by the host program at startup. The
//! registry is built once and then only read, so it can be shared freely
//! between classification and extraction.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

/// Decides whether a file of a plugin's extension is readable.
///
/// An `Err` from a validator is mapped to "not text" by the classifier.
pub type Validator = Arc<dyn Fn(&Path) -> Result<bool> + Send + Sync>;

/// Extracts the text content of a file of a plugin's extension.
///
/// An `Err` from a reader aborts the whole merge.
pub type Reader = Arc<dyn Fn(&Path) -> Result<String> + Send + Sync>;

/// A validator/reader pair bound to a single file extension
pub struct ReaderPlugin {
    /// Extension key, with or without the leading dot (`".pdf"` or `"pdf"`)
    pub extension: String,
    pub validator: Validator,
    pub reader: Reader,
    /// An inert plugin is skipped at registration time
    pub enabled: bool,
}

impl ReaderPlugin {
    /// Create an enabled plugin for the given extension
    pub fn new(
        extension: impl Into<String>,
        validator: impl Fn(&Path) -> Result<bool> + Send + Sync + 'static,
        reader: impl Fn(&Path) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            extension: extension.into(),
            validator: Arc::new(validator),
            reader: Arc::new(reader),
            enabled: true,
        }
    }

    /// Mark the plugin inert; it will be excluded from the registry build
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Immutable extension-keyed lookup of validator and reader overrides
#[derive(Clone, Default)]
pub struct PluginRegistry {
    validators: HashMap<String, Validator>,
    readers: HashMap<String, Reader>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("readers", &self.readers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginRegistry {
    /// Create an empty registry (no overrides, default behavior everywhere)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of plugins
    ///
    /// Inert plugins are skipped. Two enabled plugins claiming the same
    /// extension is an error rather than last-registered-wins.
    pub fn from_plugins(plugins: impl IntoIterator<Item = ReaderPlugin>) -> Result<Self> {
        let mut registry = Self::new();
        for plugin in plugins {
            registry.register(plugin)?;
        }
        Ok(registry)
    }

    /// Register a single plugin
    /// Returns an error if the extension already has an entry
    pub fn register(&mut self, plugin: ReaderPlugin) -> Result<()> {
        if !plugin.enabled {
            return Ok(());
        }

        let key = normalize_extension(&plugin.extension);
        if self.validators.contains_key(&key) {
            anyhow::bail!("Duplicate plugin for extension: {}", key);
        }
        self.validators.insert(key.clone(), plugin.validator);
        self.readers.insert(key, plugin.reader);
        Ok(())
    }

    /// Register an existing entry's validator/reader pair under a second
    /// extension, reusing its logic without re-implementation
    pub fn alias(&mut self, extension: &str, existing: &str) -> Result<()> {
        let from = normalize_extension(existing);
        let to = normalize_extension(extension);

        let validator = self
            .validators
            .get(&from)
            .ok_or_else(|| anyhow::anyhow!("No plugin registered for extension: {}", from))?
            .clone();
        // validators and readers are inserted in lockstep, so this cannot miss
        let reader = self
            .readers
            .get(&from)
            .ok_or_else(|| anyhow::anyhow!("No plugin registered for extension: {}", from))?
            .clone();

        if self.validators.contains_key(&to) {
            anyhow::bail!("Duplicate plugin for extension: {}", to);
        }
        self.validators.insert(to.clone(), validator);
        self.readers.insert(to, reader);
        Ok(())
    }

    /// Look up the validator override for a path's extension
    pub fn validator_for(&self, path: &Path) -> Option<&Validator> {
        self.validators.get(&extension_key(path)?)
    }

    /// Look up the reader override for a path's extension
    pub fn reader_for(&self, path: &Path) -> Option<&Reader> {
        self.readers.get(&extension_key(path)?)
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Registry keys always carry the leading dot
fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

fn extension_key(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}
