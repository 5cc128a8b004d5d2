//! Flat text-file persistence for generated results.
//!
//! Paths are used verbatim. `save` truncates; there is no atomic rename and no
//! directory creation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const LISTING_FILE: &str = "listingdescript.txt";
pub const COMPARISON_FILE: &str = "offer_comparison.txt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(path.to_path_buf())
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Creates or overwrites `path` with `content`.
pub async fn save(path: &Path, content: &str) -> Result<(), StorageError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| StorageError::from_io(path, e))?;
    info!(path = %path.display(), bytes = content.len(), "Saved output");
    Ok(())
}

pub async fn load(path: &Path) -> Result<String, StorageError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StorageError::from_io(path, e))
}
