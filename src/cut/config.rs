//! Configuration loading for treecut.
//!
//! `defaults/treecut.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. Applications layer their own files
//! and key overrides on top via [`Loader`] before deserializing into [`CutConfig`].

use crate::cut::error::CutError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/treecut.default.toml");

/// Parsed once per process; backs the `Default` impls below.
static DEFAULTS: Lazy<CutConfig> =
    Lazy::new(|| load_defaults().expect("embedded treecut defaults must deserialize"));

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutConfig {
    pub lists: ListConfig,
    pub paging: PagingConfig,
}

/// Which elements make up an ordered list, for numbering continuity on extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    pub list_tag: String,
    pub item_tag: String,
    pub start_attribute: String,
}

impl ListConfig {
    /// Tag comparison is ASCII case-insensitive
    pub fn is_list(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.list_tag)
    }

    pub fn is_item(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.item_tag)
    }
}

/// Page budget knobs for the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    pub max_nodes: usize,
    /// 0 means unlimited
    pub max_text_chars: usize,
}

impl Default for CutConfig {
    fn default() -> Self {
        DEFAULTS.clone()
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        DEFAULTS.lists.clone()
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        DEFAULTS.paging
    }
}

/// Builds a [`CutConfig`] from the embedded defaults plus any number of TOML layers.
///
/// Later layers win key by key, so a file that only sets `paging.max_nodes` keeps
/// the default list tags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded `treecut.default.toml` so far
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist; [`build`](Self::build) fails without it
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that is skipped when absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key above every file layer, e.g. `("paging.max_nodes", 10)`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize them into a [`CutConfig`]
    pub fn build(self) -> Result<CutConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<CutConfig, ConfigError> {
    Loader::new().build()
}

/// Defaults with an optional user file layered on top, e.g. `~/.config/treecut.toml`.
pub fn load_with_optional_file(path: impl AsRef<Path>) -> Result<CutConfig, CutError> {
    Ok(Loader::new().with_optional_file(path).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lists.list_tag, "ol");
        assert_eq!(config.lists.item_tag, "li");
        assert_eq!(config.lists.start_attribute, "start");
        assert_eq!(config.paging.max_nodes, 64);
        assert_eq!(config.paging.max_text_chars, 0);
        assert_eq!(CutConfig::default(), config);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("lists.list_tag", "steps")
            .expect("override to apply")
            .set_override("paging.max_nodes", 8)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.lists.list_tag, "steps");
        assert_eq!(config.lists.item_tag, "li");
        assert_eq!(config.paging.max_nodes, 8);
    }

    #[test]
    fn layers_files() {
        let path = std::env::temp_dir().join(format!("treecut-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[paging]\nmax_text_chars = 500").expect("write temp file");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.paging.max_text_chars, 500);
        assert_eq!(config.paging.max_nodes, 64);
    }

    #[test]
    fn missing_files() {
        let missing = std::env::temp_dir().join("treecut-definitely-missing.toml");
        assert!(Loader::new().with_optional_file(&missing).build().is_ok());
        assert!(Loader::new().with_file(&missing).build().is_err());
    }

    #[test]
    fn malformed_files_surface_as_cut_errors() {
        let path = std::env::temp_dir().join(format!("treecut-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[paging]\nmax_nodes = \"many\"\n").expect("write temp file");

        let result = load_with_optional_file(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(CutError::Config(_))));
    }

    #[test]
    fn list_tags_ignore_case() {
        let lists = ListConfig::default();
        assert!(lists.is_list("OL"));
        assert!(lists.is_item("Li"));
        assert!(!lists.is_list("ul"));
    }
}
