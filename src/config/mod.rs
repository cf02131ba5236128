//! Configuration system for magictree.
//!
//! Settings come from `~/.config/magictree/config.toml` when it exists and
//! fall back to defaults otherwise. Command-line flags override them.
//!
//! # Example
//!
//! ```
//! use magictree::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.format, OutputFormat::Outline);
//! assert_eq!(config.indent_size, 2);
//!
//! let custom = Config {
//!     format: OutputFormat::Json,
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! assert!(custom.pretty);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The projection a tree is rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented ASCII outline
    #[default]
    #[value(alias = "ascii")]
    #[serde(alias = "ascii")]
    Outline,
    /// JSON document
    Json,
    /// YAML document
    #[value(alias = "yml")]
    #[serde(alias = "yml")]
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Outline => "outline",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for the magictree binary.
///
/// # Fields
///
/// * `format` - Default output projection (default: outline)
/// * `indent_size` - Spaces per level in pretty-printed JSON (default: 2)
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `create_backup` - Create .bak files before overwriting an output file (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output projection
    #[serde(default)]
    pub format: OutputFormat,

    /// Spaces per level in pretty-printed JSON
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Create .bak files before overwriting an output file
    #[serde(default)]
    pub create_backup: bool,
}

fn default_indent_size() -> usize {
    2
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            indent_size: default_indent_size(),
            pretty: default_pretty(),
            create_backup: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/magictree/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("magictree");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file {}: {:#}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).context("Failed to parse config")
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to an explicit file.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
