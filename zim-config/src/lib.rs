//! Configuration loader for zim2obsidian.
//!
//! `defaults/zim2obsidian.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer an export's own
//! `zim2obsidian.toml` and command line overrides on top via [`Loader`] before deserializing
//! into [`ZimConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use zim_babel::passes::StyleOptions;
use zim_babel::PipelineOptions;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/zim2obsidian.default.toml");

/// File name looked up in the export root.
pub const CONFIG_FILE_NAME: &str = "zim2obsidian.toml";

/// Top-level configuration of a conversion run.
#[derive(Debug, Clone, Deserialize)]
pub struct ZimConfig {
    pub pages: PagesConfig,
    pub style: StyleConfig,
    pub links: LinksConfig,
    pub indent: IndentConfig,
}

/// Page level steps.
#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    pub rename: bool,
    pub remove_first_line: bool,
}

/// Mirrors [`StyleOptions`], plus a switch for the whole step.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    pub enabled: bool,
    pub backticks: bool,
    pub preserve_at: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    pub wikilinks: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndentConfig {
    pub restore: bool,
}

impl StyleConfig {
    /// Options for the style pass, or `None` when the step is disabled.
    pub fn options(&self) -> Option<StyleOptions> {
        self.enabled.then_some(StyleOptions {
            backticks: self.backticks,
            preserve_at: self.preserve_at,
        })
    }
}

impl From<&ZimConfig> for PipelineOptions {
    fn from(config: &ZimConfig) -> Self {
        PipelineOptions {
            rename_pages: config.pages.rename,
            remove_first_line: config.pages.remove_first_line,
            style: config.style.options(),
            wikilinks: config.links.wikilinks,
            restore_indent: config.indent.restore,
        }
    }
}

impl From<ZimConfig> for PipelineOptions {
    fn from(config: ZimConfig) -> Self {
        (&config).into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ZimConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ZimConfig, ConfigError> {
    Loader::new().build()
}
