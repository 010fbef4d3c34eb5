//! Developer tool operations
//!
//! The operations behind every MCP tool and CLI subcommand.

pub mod devtools;

pub use devtools::DevTools;
