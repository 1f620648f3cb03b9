//! Shared configuration loader for the mml toolchain.
//!
//! `defaults/mml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MmlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mml_parser::{ParseOptions, SerializeOptions, TreevizOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mml.default.toml");

/// Top-level configuration consumed by mml applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MmlConfig {
    pub serialize: SerializeConfig,
    pub inspect: InspectConfig,
    #[serde(default)]
    pub ids: IdsConfig,
}

/// Knobs of the markup serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializeConfig {
    pub indent: String,
    pub trailing_newline: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub label_width: usize,
    pub show_attributes: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdsConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<&SerializeConfig> for SerializeOptions {
    fn from(config: &SerializeConfig) -> Self {
        SerializeOptions {
            indent: config.indent.clone(),
            trailing_newline: config.trailing_newline,
        }
    }
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        TreevizOptions {
            label_width: config.label_width,
            show_attributes: config.show_attributes,
        }
    }
}

impl From<&IdsConfig> for ParseOptions {
    fn from(config: &IdsConfig) -> Self {
        ParseOptions {
            id_seed: config.seed,
        }
    }
}

impl MmlConfig {
    pub fn serialize_options(&self) -> SerializeOptions {
        (&self.serialize).into()
    }

    pub fn treeviz_options(&self) -> TreevizOptions {
        (&self.inspect.treeviz).into()
    }

    pub fn parse_options(&self) -> ParseOptions {
        (&self.ids).into()
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MmlConfig, ConfigError> {
    Loader::new().build()
}
