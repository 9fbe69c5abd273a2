//! MCP tool servers for card BIN lookups and OlduBil document retrieval.
//!
//! Each adapter builds its own [`mcp::ToolRegistry`]; the binaries in
//! `src/bin` host one registry each over stdio or HTTP.

pub mod bin_lookup;
pub mod config;
pub mod mcp;
pub mod oldubil;
pub mod server;

pub use config::ServerConfig;
