//! Tool registry - the name → handler table a server hosts.
//!
//! A registry is built explicitly by each adapter's `build_registry` and handed
//! to [`McpService`](crate::mcp::McpService). It also carries the fixed prompts
//! and resources the server advertises.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::mcp::content::ToolResult;

/// Tool descriptor conforming to MCP specification.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A callable tool.
///
/// Handlers never fail at the protocol level: every failure is folded into an
/// error [`ToolResult`].
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    async fn call(&self, arguments: Option<Value>) -> ToolResult;
}

/// Fixed instructional text exposed through `prompts/*`.
#[derive(Debug, Clone)]
pub struct StaticPrompt {
    pub name: String,
    pub description: Option<String>,
    pub text: String,
}

/// Fixed informational text exposed through `resources/*`.
#[derive(Debug, Clone)]
pub struct StaticResource {
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: String,
    pub text: String,
}

/// Identity reported during `initialize`.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub title: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),
    #[error("prompt '{0}' is already registered")]
    DuplicatePrompt(String),
    #[error("resource '{0}' is already registered")]
    DuplicateResource(String),
}

/// Central registry for the tools, prompts and resources of one server.
pub struct ToolRegistry {
    identity: ServerIdentity,
    tools: Vec<Box<dyn ToolHandler>>,
    prompts: Vec<StaticPrompt>,
    resources: Vec<StaticResource>,
}

impl ToolRegistry {
    pub fn new(identity: ServerIdentity) -> Self {
        Self {
            identity,
            tools: Vec::new(),
            prompts: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    pub fn register_tool<H>(&mut self, handler: H) -> Result<&mut Self, RegistryError>
    where
        H: ToolHandler + 'static,
    {
        let name = handler.descriptor().name;
        if self.find_tool(&name).is_some() {
            return Err(RegistryError::DuplicateTool(name));
        }
        self.tools.push(Box::new(handler));
        Ok(self)
    }

    pub fn register_prompt(&mut self, prompt: StaticPrompt) -> Result<&mut Self, RegistryError> {
        if self.prompt(&prompt.name).is_some() {
            return Err(RegistryError::DuplicatePrompt(prompt.name));
        }
        self.prompts.push(prompt);
        Ok(self)
    }

    pub fn register_resource(
        &mut self,
        resource: StaticResource,
    ) -> Result<&mut Self, RegistryError> {
        if self.resource(&resource.uri).is_some() {
            return Err(RegistryError::DuplicateResource(resource.uri));
        }
        self.resources.push(resource);
        Ok(self)
    }

    /// List all available tools, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.descriptor().name).collect()
    }

    /// Call a tool by name. Unknown names produce an error result.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match self.find_tool(name) {
            Some(tool) => tool.call(arguments).await,
            None => ToolResult::error(format!(
                "Unknown tool '{}'. Available tools: {}",
                name,
                self.tool_names().join(", ")
            )),
        }
    }

    pub fn prompts(&self) -> &[StaticPrompt] {
        &self.prompts
    }

    pub fn prompt(&self, name: &str) -> Option<&StaticPrompt> {
        self.prompts.iter().find(|prompt| prompt.name == name)
    }

    pub fn resources(&self) -> &[StaticResource] {
        &self.resources
    }

    pub fn resource(&self, uri: &str) -> Option<&StaticResource> {
        self.resources.iter().find(|resource| resource.uri == uri)
    }

    fn find_tool(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.tools
            .iter()
            .find(|tool| tool.descriptor().name == name)
            .map(|tool| tool.as_ref())
    }
}

/// Deserialize tool arguments into a typed request.
pub fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: Option<Value>) -> Result<T, String> {
    let value = arguments.unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|err| format!("Invalid arguments: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: "echo".to_string(),
                description: "Echo the arguments back".to_string(),
                input_schema: json!({ "type": "object" }),
            }
        }

        async fn call(&self, arguments: Option<Value>) -> ToolResult {
            ToolResult::json(arguments.unwrap_or(Value::Null))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new(ServerIdentity {
            name: "TestServer".to_string(),
            title: None,
            instructions: None,
        });
        registry.register_tool(EchoTool).unwrap();
        registry
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let mut registry = registry();
        let err = registry.register_tool(EchoTool).err();
        assert_eq!(err, Some(RegistryError::DuplicateTool("echo".to_string())));
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let resource = StaticResource {
            uri: "test://a".to_string(),
            name: "a".to_string(),
            description: None,
            mime_type: "text/plain".to_string(),
            text: "a".to_string(),
        };
        let mut registry = registry();
        registry.register_resource(resource.clone()).unwrap();
        assert!(registry.register_resource(resource).is_err());
    }

    #[actix_web::test]
    async fn test_call_known_tool() {
        let result = registry().call_tool("echo", Some(json!({ "x": 1 }))).await;
        assert!(!result.is_error);
        assert_eq!(result.structured_content, Some(json!({ "x": 1 })));
    }

    #[actix_web::test]
    async fn test_call_unknown_tool_lists_available() {
        let result = registry().call_tool("nope", None).await;
        let record = result.error_record().unwrap();
        assert!(record.error.contains("Unknown tool 'nope'"));
        assert!(record.error.contains("echo"));
    }

    #[test]
    fn test_parse_arguments_missing() {
        #[derive(Debug, Deserialize)]
        struct Args {
            #[allow(dead_code)]
            bin: String,
        }
        let err = parse_arguments::<Args>(None).unwrap_err();
        assert!(err.starts_with("Invalid arguments:"));
    }
}
