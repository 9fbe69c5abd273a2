//! MCP (Model Context Protocol) Module
//!
//! JSON-RPC 2.0 service shared by both servers, with stdio and stateless HTTP
//! transports.

pub mod content;
pub mod handlers;
pub mod registry;
pub mod rpc;
pub mod service;
pub mod stdio;

pub use content::{ErrorRecord, ToolResult};
pub use handlers::{config, McpState};
pub use registry::{
    ServerIdentity, StaticPrompt, StaticResource, ToolDescriptor, ToolHandler, ToolRegistry,
};
pub use service::McpService;
