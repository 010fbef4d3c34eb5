//! Runtime-settable project directory
//!
//! The project directory is read by every tool and can be reassigned by
//! `set_nextflow_directory`. Readers take a snapshot under a read lock so a
//! concurrent reassignment is never observed half-way.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::expand_path;
use crate::error::ToolError;

/// Outcome of pointing the server at a new directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryChange {
    /// Directory contains at least one marker file
    Accepted(PathBuf),
    /// Directory was set but carries none of the marker files
    Unrecognized(PathBuf),
}

impl DirectoryChange {
    pub fn path(&self) -> &Path {
        match self {
            DirectoryChange::Accepted(path) | DirectoryChange::Unrecognized(path) => path,
        }
    }
}

/// Shared, lock-guarded project directory
#[derive(Debug, Clone)]
pub struct ProjectDir {
    current: Arc<RwLock<PathBuf>>,
    markers: Arc<Vec<String>>,
}

impl ProjectDir {
    /// Create with an initial directory and the marker files that identify a checkout
    pub fn new(initial: impl Into<PathBuf>, markers: Vec<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial.into())),
            markers: Arc::new(markers),
        }
    }

    /// Snapshot of the current directory
    pub async fn get(&self) -> PathBuf {
        self.current.read().await.clone()
    }

    /// Reassign the directory
    ///
    /// A path that is not an existing directory is rejected and the previous
    /// value is kept. A directory without any marker file is still accepted.
    pub async fn set(&self, path: &str) -> Result<DirectoryChange, ToolError> {
        let expanded = expand_path(path);

        let is_dir = tokio::fs::metadata(&expanded)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ToolError::DirectoryNotFound {
                path: expanded.display().to_string(),
            });
        }

        let resolved = tokio::fs::canonicalize(&expanded).await?;
        let recognized = self.has_marker(&resolved).await;

        *self.current.write().await = resolved.clone();

        if recognized {
            Ok(DirectoryChange::Accepted(resolved))
        } else {
            Ok(DirectoryChange::Unrecognized(resolved))
        }
    }

    async fn has_marker(&self, dir: &Path) -> bool {
        for marker in self.markers.iter() {
            if tokio::fs::metadata(dir.join(marker))
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false)
            {
                return true;
            }
        }
        false
    }
}
