//! Makefile target discovery
//!
//! Targets are re-read from the Makefile on every query so that edits made
//! outside the server are always visible. Only lines of the exact form
//! `name:` (optionally followed by a `#` comment) at column zero count as
//! target declarations. Indented lines, rules with prerequisites, variable
//! assignments and pattern rules are never reported.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a bare target declaration: "name:" with an optional trailing comment
static TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_-]+):\s*(?:#.*)?$").unwrap());

/// Set of targets discovered in one read of the Makefile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    names: BTreeSet<String>,
}

impl Targets {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Target names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// First of `preferred`, `fallback` that is present
    pub fn select(&self, preferred: &str, fallback: &str) -> Option<String> {
        [preferred, fallback]
            .into_iter()
            .find(|name| self.contains(name))
            .map(str::to_string)
    }
}

impl<S: Into<String>> FromIterator<S> for Targets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Scan Makefile text for target declarations, one line at a time
pub fn parse_targets(content: &str) -> Targets {
    content
        .lines()
        .filter_map(|line| TARGET_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Discovers targets in the Makefile of a project directory
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    makefile: String,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new("Makefile")
    }
}

impl TargetRegistry {
    /// Create a registry reading the given file name under each project root
    pub fn new(makefile: impl Into<String>) -> Self {
        Self {
            makefile: makefile.into(),
        }
    }

    /// Path of the Makefile under `root`
    pub fn makefile_path(&self, root: &Path) -> PathBuf {
        root.join(&self.makefile)
    }

    /// Discover all targets declared in `root`'s Makefile
    ///
    /// A missing or unreadable file is logged and yields an empty set; callers
    /// must treat an empty set as a failed discovery.
    pub async fn discover(&self, root: &Path) -> Targets {
        let path = self.makefile_path(root);

        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::error!("Makefile not found at {}", path.display());
            return Targets::default();
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let targets = parse_targets(&content);
                tracing::info!(
                    "Found {} make targets in {}",
                    targets.len(),
                    path.display()
                );
                targets
            }
            Err(e) => {
                tracing::error!("Error parsing Makefile {}: {}", path.display(), e);
                Targets::default()
            }
        }
    }

    /// Whether `name` is a discoverable target under `root`
    pub async fn is_valid(&self, root: &Path, name: &str) -> bool {
        self.discover(root).await.contains(name)
    }

    /// `preferred` if discoverable, else `fallback` if discoverable
    pub async fn select_fallback(
        &self,
        root: &Path,
        preferred: &str,
        fallback: &str,
    ) -> Option<String> {
        self.discover(root).await.select(preferred, fallback)
    }
}
