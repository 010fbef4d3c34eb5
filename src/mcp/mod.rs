//! MCP server module
//!
//! Exposes the developer tools, documentation resources and prompts over the
//! Model Context Protocol.

pub mod server;

pub use server::DevToolsServer;
