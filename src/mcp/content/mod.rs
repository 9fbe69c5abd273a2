//! Content types module for MCP tool responses.
//!
//! Tool outputs are JSON values rendered as text content, with the same value
//! attached as structured content.

pub mod types;

pub use types::{ContentItem, ErrorRecord, ToolResult};
