//! Configuration module for nextflow-devtools
//!
//! Provides XDG-compliant layered configuration loading and the
//! runtime-settable project directory.

pub mod loader;
pub mod model;
pub mod project;

pub use loader::{config_paths, find_config_files, load_config, PROJECT_DIR_ENV};
pub use model::*;
pub use project::{DirectoryChange, ProjectDir};
