//! @dose
//! purpose: Configuration file parsing for apiview.toml. Holds the package name used as the
//!     canonical id prefix, exclusion patterns, and the default output format.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - !CLI flags override file values via Config::merge_cli; never the other way round
//!
//! invariants:
//!     - Config::load returns default config if apiview.toml doesn't exist or is invalid
//!     - Exclude patterns use the same glob syntax as --exclude
//!
//! gotchas:
//!     - Patterns are matched against paths relative to project root
//!     - An empty package string means "no package prefix"

use crate::formatter::OutputFormat;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "apiview.toml";

/// Main configuration structure matching apiview.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Package name prefixed to canonical ids ("package!Name")
    pub package: Option<String>,

    /// Exclusion patterns (gitignore-style)
    pub exclude: Vec<String>,

    /// Output format when --format is not given
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from apiview.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), "Failed to parse {}: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "Failed to read {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Apply command-line overrides
    pub fn merge_cli(
        mut self,
        package: Option<String>,
        exclude: &[String],
        format: Option<OutputFormat>,
    ) -> Self {
        if package.is_some() {
            self.package = package;
        }
        self.exclude.extend(exclude.iter().cloned());
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Package prefix, treating an empty string as absent
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref().filter(|p| !p.is_empty())
    }
}
