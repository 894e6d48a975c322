//! Writes analysis results as YAML files into an output directory.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize {file}: {message}")]
    Serialization { file: String, message: String },

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// YAML report writer rooted at an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serializes `value` to `{output_dir}/{file_name}`, replacing any previous file.
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, ReportError> {
        let yaml = serde_yaml::to_string(value).map_err(|e| ReportError::Serialization {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ReportError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self.output_dir.join(file_name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|source| ReportError::Io {
                path: temp_path.clone(),
                source,
            })?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), "Wrote report");
        Ok(path)
    }
}
