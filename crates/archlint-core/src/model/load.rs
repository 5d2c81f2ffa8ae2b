//! YAML loading for architecture documents.

use miette::Diagnostic;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::Architecture;

/// Errors from reading or parsing an architecture document.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// IO error reading the document.
    #[error("Failed to read architecture file {path}: {source}")]
    #[diagnostic(code(archlint::load::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the schema.
    #[error("Failed to parse architecture: {0}")]
    #[diagnostic(
        code(archlint::load::yaml),
        help("unknown fields are rejected; check spelling against the schema")
    )]
    Yaml(#[from] serde_yaml::Error),
}

impl Architecture {
    /// Parses an architecture from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or contains unknown fields.
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses an architecture from a YAML reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or contains unknown fields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Loads an architecture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("Loaded architecture from {}", path.display());
        Self::from_yaml_str(&content)
    }
}
