//! TOML configuration for the `blockz` renderer.
//!
//! ```toml
//! [theme.colors]
//! primary = "#0e7490"
//!
//! [rules.groups]
//! default_inner = "inner--prose"
//! no_wrap = ["core/html"]
//!
//! [dynamic_blocks]
//! "core/latest-posts" = "<ul class=\"latest-posts\"></ul>"
//! ```

use blockz_engine::{
    Attributes, BoxError, RegisteredBlockTypes, RuleOverrides, ServerRenderedBlock, ThemePalette,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Token → colour value, used to turn raw colours back into theme classes.
    pub colors: ThemePalette,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    /// Replacement rule tables, registered once before rendering.
    pub rules: RuleOverrides,
    /// Block name → markup returned when that block is rendered dynamically.
    pub dynamic_blocks: BTreeMap<String, String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockz");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in a path given on the command
    /// line. Paths with unknown variables are returned unchanged.
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }

    pub fn palette(&self) -> ThemePalette {
        self.theme.colors.clone()
    }

    /// A registry where every configured fixture is a dynamic block
    /// returning its markup unchanged.
    pub fn block_types(&self) -> RegisteredBlockTypes {
        let mut block_types = RegisteredBlockTypes::new();
        for (name, markup) in &self.dynamic_blocks {
            let markup = markup.clone();
            block_types.register(
                name.as_str(),
                ServerRenderedBlock::new(
                    move |_attributes: &Attributes, _content: &str| -> Result<String, BoxError> {
                        Ok(markup.clone())
                    },
                ),
            );
        }
        block_types
    }
}
