//! MCP stdio providers
//!
//! Each tool provider is an MCP server spawned as a child process and spoken
//! to over stdin/stdout. The protocol itself is handled by `rmcp`; this module
//! only spawns the process and converts between `rmcp` and domain types.

mod connection;
mod convert;
mod launcher;

pub use connection::McpConnection;
pub use launcher::McpLauncher;
