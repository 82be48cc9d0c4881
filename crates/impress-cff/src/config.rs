//! Configuration for impress-cff
//!
//! Loaded from TOML. Lookup order: an explicit path, `$IMPRESS_CFF_CONFIG`,
//! then `<config dir>/impress-cff/config.toml`; defaults otherwise.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::{RenderFormat, RenderOptions};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "IMPRESS_CFF_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CffConfig {
    pub loader: LoaderConfig,
    pub render: RenderConfig,
}

/// Loader behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Treat validation warnings as errors
    pub strict: bool,
}

/// Rendering defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Format used when none is given on the command line
    pub default_format: RenderFormat,
    /// Authors listed in full before APA truncates with an ellipsis
    pub apa_max_authors: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_format: RenderFormat::default(),
            apa_max_authors: RenderOptions::default().apa_max_authors,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            apa_max_authors: self.apa_max_authors,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl CffConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Default location: `<config dir>/impress-cff/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impress-cff").join("config.toml"))
    }

    /// Resolve and load configuration.
    ///
    /// An explicit path must exist. The environment variable and the
    /// default location are used only when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            tracing::debug!("loading config from ${} = {:?}", CONFIG_ENV_VAR, path);
            return Self::from_file(&path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("loading config from {:?}", path);
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.apa_max_authors < 2 {
            return Err(ConfigError::OutOfRange(
                "render.apa_max_authors must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
