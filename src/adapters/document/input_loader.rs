//! Loads analysis input documents from YAML (or JSON) files.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::domain::architecture::AnalysisInput;

#[derive(Debug, Error)]
pub enum InputLoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads an analysis input document from disk.
pub struct YamlInputLoader;

impl YamlInputLoader {
    /// Loads and parses one input file.
    ///
    /// YAML is a superset of JSON, so `.json` inputs load as well.
    pub async fn load(path: impl AsRef<Path>) -> Result<AnalysisInput, InputLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputLoadError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| InputLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let input = Self::parse(&content).map_err(|message| InputLoadError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            path = %path.display(),
            architectures = input.architectures.len(),
            "Loaded analysis input"
        );
        Ok(input)
    }

    /// Parses an input document from a string.
    pub fn parse(content: &str) -> Result<AnalysisInput, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}
