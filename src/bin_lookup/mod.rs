//! BIN lookup server: `lookup_card`, `validate_bin`, plus the
//! `card://bin-lookup` prompt and resource.

pub mod client;
pub mod tools;
pub mod validation;

pub use client::{BinListClient, LookupError};
pub use validation::{is_exact_bin, validate_bin};

use crate::mcp::registry::{RegistryError, ServerIdentity, ToolRegistry};

pub const SERVER_NAME: &str = "BinLookupServer";

/// Build the registry hosted by the BIN lookup server.
pub fn build_registry(client: BinListClient) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new(ServerIdentity {
        name: SERVER_NAME.to_string(),
        title: Some("Card BIN Lookup".to_string()),
        instructions: Some(tools::BIN_LOOKUP_RESOURCE_TEXT.to_string()),
    });

    registry
        .register_tool(tools::LookupCardTool::new(client))?
        .register_tool(tools::ValidateBinTool)?
        .register_prompt(tools::bin_lookup_prompt())?
        .register_resource(tools::bin_lookup_resource())?;

    Ok(registry)
}
