//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! We look for a folio.toml (or the file named on the command line), and if present load
//! settings from there. Every field has a default, so an empty or absent file is valid.

use crate::analyze::{AnalyzerOptions, DEFAULT_MAX_TERMS, DEFAULT_WORDS_PER_MINUTE};
use crate::error::{Error, Result};
use crate::section::Level;
use facet::Facet;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from folio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2)]
    /// Depth at which the paper is cut into segment files (2 is `\section`).
    pub split_level: usize,
    #[facet(default = DEFAULT_MAX_TERMS)]
    /// Key terms kept per segment in the index.
    pub max_key_terms: usize,
    #[facet(default = DEFAULT_WORDS_PER_MINUTE)]
    /// Reading speed used for time estimates.
    pub words_per_minute: usize,
    #[facet(default = 50)]
    /// Longest title slug used in a segment file name.
    pub slug_max_length: usize,
    #[facet(default = "sections".to_string())]
    /// Directory under the paper directory receiving segment files.
    pub sections_dir: String,
    #[facet(default = "taxonomy".to_string())]
    /// Directory under the paper directory receiving taxonomy caches.
    pub taxonomy_dir: String,
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not a valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`, or from folio.toml in the working directory.
    ///
    /// A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading configuration from {}", path.display());
                Self::from_toml(&contents)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_toml(""),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    #[must_use]
    /// Sectioning rank the split cuts at, clamped to the known ranks.
    pub fn split_rank(&self) -> Level {
        Level::from_depth(self.split_level).unwrap_or(Level::Paragraph)
    }

    #[must_use]
    /// Analysis tunables derived from this configuration.
    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            max_terms: self.max_key_terms,
            words_per_minute: self.words_per_minute,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            split_level: 2,
            max_key_terms: DEFAULT_MAX_TERMS,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            slug_max_length: 50,
            sections_dir: "sections".to_string(),
            taxonomy_dir: "taxonomy".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
