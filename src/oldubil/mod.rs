//! OlduBil document server: `get_oldubil_info`, plus the `oldubil://info`
//! prompt and resource.

pub mod documents;
pub mod tools;

pub use documents::{
    extract_pdf_text, is_oldubil_pdf, DocumentCollection, DocumentError, DocumentLibrary,
};

use crate::mcp::registry::{RegistryError, ServerIdentity, ToolRegistry};

pub const SERVER_NAME: &str = "OlduBilServer";

/// Build the registry hosted by the OlduBil server.
pub fn build_registry(library: DocumentLibrary) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new(ServerIdentity {
        name: SERVER_NAME.to_string(),
        title: Some("OlduBil Documents".to_string()),
        instructions: Some(tools::OLDUBIL_RESOURCE_TEXT.to_string()),
    });

    registry
        .register_tool(tools::GetOldubilInfoTool::new(library))?
        .register_prompt(tools::oldubil_prompt())?
        .register_resource(tools::oldubil_resource())?;

    Ok(registry)
}
