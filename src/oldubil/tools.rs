//! Tool, prompt and resource definitions for the OlduBil server.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::mcp::registry::{StaticPrompt, StaticResource, ToolDescriptor, ToolHandler};
use crate::mcp::ToolResult;
use crate::oldubil::documents::DocumentLibrary;

pub const GET_OLDUBIL_INFO_TOOL: &str = "get_oldubil_info";

pub const OLDUBIL_PROMPT: &str = "oldubil://info";
pub const OLDUBIL_RESOURCE_URI: &str = "oldubil://info";

pub const OLDUBIL_PROMPT_TEXT: &str = concat!(
    "You are an expert on OlduBil. When asked about OlduBil, use the 'get_oldubil_info' tool. ",
    "This tool reads local PDF documents about OlduBil and provides relevant content. ",
    "Do not answer based on assumptions—use the tool output only."
);

pub const OLDUBIL_RESOURCE_TEXT: &str = concat!(
    "To answer questions about OlduBil, use the 'get_oldubil_info' tool. ",
    "It reads from local PDF files located in the same directory as this server. ",
    "These documents include internal material, and the assistant must rely on them."
);

/// `get_oldubil_info`: returns `{filename: text}` for every OlduBil PDF.
pub struct GetOldubilInfoTool {
    library: Arc<DocumentLibrary>,
}

impl GetOldubilInfoTool {
    pub fn new(library: DocumentLibrary) -> Self {
        Self {
            library: Arc::new(library),
        }
    }
}

#[async_trait]
impl ToolHandler for GetOldubilInfoTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: GET_OLDUBIL_INFO_TOOL.to_string(),
            description: "Return extracted content from local OlduBil-related PDF files."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, _arguments: Option<Value>) -> ToolResult {
        let library = Arc::clone(&self.library);
        // PDF parsing is blocking file work.
        match tokio::task::spawn_blocking(move || library.get_oldubil_info()).await {
            Ok(outcome) => ToolResult::from_outcome(outcome),
            Err(err) => ToolResult::error(format!("Document extraction task failed: {err}")),
        }
    }
}

pub fn oldubil_prompt() -> StaticPrompt {
    StaticPrompt {
        name: OLDUBIL_PROMPT.to_string(),
        description: None,
        text: OLDUBIL_PROMPT_TEXT.to_string(),
    }
}

pub fn oldubil_resource() -> StaticResource {
    StaticResource {
        uri: OLDUBIL_RESOURCE_URI.to_string(),
        name: "oldubil_resource".to_string(),
        description: None,
        mime_type: "text/plain".to_string(),
        text: OLDUBIL_RESOURCE_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_takes_no_arguments() {
        let tool = GetOldubilInfoTool::new(DocumentLibrary::new("."));
        let desc = tool.descriptor();
        assert_eq!(desc.name, GET_OLDUBIL_INFO_TOOL);
        assert_eq!(desc.input_schema["properties"], json!({}));
    }

    #[actix_web::test]
    async fn test_missing_directory_becomes_error_result() {
        let tool = GetOldubilInfoTool::new(DocumentLibrary::new("/definitely/not/here"));
        let result = tool.call(None).await;
        assert!(result.is_error);
        assert!(result.error_record().unwrap().error.starts_with("Failed to list"));
    }
}
