//! Runner module for target discovery and command construction
//!
//! Provides:
//! - Makefile target discovery and validation
//! - make, Gradle wrapper and project-script invocations

pub mod gradle;
pub mod makefile;
pub mod script;
pub mod targets;
pub mod traits;

pub use gradle::GradleRunner;
pub use makefile::MakefileRunner;
pub use script::ScriptRunner;
pub use targets::{parse_targets, TargetRegistry, Targets};
pub use traits::*;
