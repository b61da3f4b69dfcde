use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for rendering advisories.
///
/// This struct holds settings that the command line tool applies to every
/// render, unless overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Encoding written to the XML declaration.
    ///
    /// When `None`, the advisory's own encoding is used.
    pub encoding: Option<String>,

    /// Whether to collect missing required fields instead of failing on the
    /// first one.
    pub ignore_violations: bool,

    /// The number of spaces used per indentation level.
    indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: None,
            ignore_violations: false,
            indent: default_indent(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of spaces per indentation level.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Sets the number of spaces per indentation level.
    pub const fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }
}

const fn default_indent() -> usize {
    2
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        encoding: Option<String>,

        #[serde(default)]
        ignore_violations: bool,

        #[serde(default = "default_indent")]
        indent: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                encoding,
                ignore_violations,
                indent,
            } => Self {
                encoding,
                ignore_violations,
                indent,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            encoding: config.encoding,
            ignore_violations: config.ignore_violations,
            indent: config.indent,
        }
    }
}
