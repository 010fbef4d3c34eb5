//! Command execution module
//!
//! Provides async command execution with:
//! - Timeout support
//! - Verbatim output capture
//! - Environment variable injection
//! - Working directory control

pub mod process;

pub use process::*;
