//! MCP Service - Core JSON-RPC 2.0 request handler.

use crate::mcp::registry::{ToolDescriptor, ToolRegistry};
use crate::mcp::rpc::{OutboundResponse, RpcRequest, JSONRPC_VERSION};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Core MCP request handler. Cheap to clone; the registry is shared.
#[derive(Clone)]
pub struct McpService {
    registry: Arc<ToolRegistry>,
}

impl McpService {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Decode one raw JSON-RPC message and dispatch it. Shared by both
    /// transports. Returns the response to send, if any.
    pub async fn handle_message(&self, raw: &str) -> Option<OutboundResponse> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("discarding unparseable message: {}", err);
                return Some(OutboundResponse::parse_error(err.to_string()));
            }
        };

        // Replies to server-initiated requests; these servers never send any.
        if value.get("method").is_none()
            && (value.get("result").is_some() || value.get("error").is_some())
        {
            debug!("ignoring client response message");
            return None;
        }

        let id = value.get("id").cloned();
        match serde_json::from_value::<RpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(err) => Some(OutboundResponse::invalid_request(id, err.to_string())),
        }
    }

    /// Handle one request. Messages without an id are notifications and get
    /// no response, whatever their method.
    pub async fn handle_request(&self, request: RpcRequest) -> Option<OutboundResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            warn!("received unsupported jsonrpc version: {}", request.jsonrpc);
            return Some(OutboundResponse::invalid_request(
                request.id.clone(),
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        if request.is_notification() {
            if request.method.starts_with("notifications/") {
                info!("received client notification: {}", request.method);
            } else {
                warn!("ignoring '{}' sent without an id", request.method);
            }
            return None;
        }

        let RpcRequest {
            method, params, id, ..
        } = request;

        let response = match method.as_str() {
            "initialize" => self.handle_initialize(id, params),
            "ping" => OutboundResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, params).await,
            "resources/list" => self.handle_resources_list(id),
            "resources/read" => self.handle_resources_read(id, params),
            "resources/templates/list" => self.handle_resource_templates_list(id),
            "prompts/list" => self.handle_prompts_list(id),
            "prompts/get" => self.handle_prompts_get(id, params),
            other => OutboundResponse::method_not_found(id, other),
        };

        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: InitializeParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        info!(
            "client requested initialization: {} v{} (protocol {})",
            parsed.client_info.name,
            parsed
                .client_info
                .version
                .clone()
                .unwrap_or_else(|| "unknown".into()),
            parsed.protocol_version
        );

        let identity = self.registry.identity();
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ImplementationInfo {
                name: identity.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: identity.title.clone(),
            },
            capabilities: ServerCapabilities {
                tools: ListChangedCapability::fixed(),
                prompts: ListChangedCapability::fixed(),
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
            instructions: identity.instructions.clone(),
        };

        success(id, result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> OutboundResponse {
        let payload = ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        };
        success(id, payload)
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: CallToolParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        info!("calling tool: {}", parsed.name);
        let result = self.registry.call_tool(&parsed.name, parsed.arguments).await;
        if result.is_error {
            warn!(
                "tool '{}' returned an error: {}",
                parsed.name,
                result.text().unwrap_or_default()
            );
        }
        success(id, result)
    }

    fn handle_resources_list(&self, id: Option<Value>) -> OutboundResponse {
        let resources = self
            .registry
            .resources()
            .iter()
            .map(|resource| ResourceDescriptor {
                uri: resource.uri.clone(),
                name: resource.name.clone(),
                description: resource.description.clone(),
                mime_type: Some(resource.mime_type.clone()),
            })
            .collect();
        let payload = ListResourcesResult {
            resources,
            next_cursor: None,
        };
        success(id, payload)
    }

    fn handle_resources_read(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: ResourceReadParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        let Some(resource) = self.registry.resource(&parsed.uri) else {
            debug!("resource not found: {}", parsed.uri);
            return OutboundResponse::resource_not_found(id, &parsed.uri);
        };

        let payload = ReadResourceResult {
            contents: vec![ResourceContents {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text: resource.text.clone(),
            }],
        };
        success(id, payload)
    }

    fn handle_resource_templates_list(&self, id: Option<Value>) -> OutboundResponse {
        let payload = ResourceTemplateListResult {
            resource_templates: Vec::new(),
            next_cursor: None,
        };
        success(id, payload)
    }

    fn handle_prompts_list(&self, id: Option<Value>) -> OutboundResponse {
        let prompts = self
            .registry
            .prompts()
            .iter()
            .map(|prompt| PromptDescriptor {
                name: prompt.name.clone(),
                description: prompt.description.clone(),
                arguments: Vec::new(),
            })
            .collect();
        let payload = PromptListResult {
            prompts,
            next_cursor: None,
        };
        success(id, payload)
    }

    fn handle_prompts_get(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: PromptGetParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        let Some(prompt) = self.registry.prompt(&parsed.name) else {
            return OutboundResponse::invalid_params(
                id,
                format!("Unknown prompt: {}", parsed.name),
            );
        };

        let payload = GetPromptResult {
            description: prompt.description.clone(),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: PromptContent {
                    content_type: "text".to_string(),
                    text: prompt.text.clone(),
                },
            }],
        };
        success(id, payload)
    }
}

fn success<T: Serialize>(id: Option<Value>, payload: T) -> OutboundResponse {
    match serde_json::to_value(payload) {
        Ok(value) => OutboundResponse::success(id, value),
        Err(err) => OutboundResponse::internal_error(id, format!("Failed to encode result: {err}")),
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "clientInfo")]
    client_info: ClientInfo,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "serverInfo")]
    server_info: ImplementationInfo,
    capabilities: ServerCapabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImplementationInfo {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ListChangedCapability,
    prompts: ListChangedCapability,
    resources: ResourcesCapability,
}

#[derive(Debug, Serialize)]
struct ListChangedCapability {
    #[serde(rename = "listChanged")]
    list_changed: bool,
}

impl ListChangedCapability {
    fn fixed() -> Self {
        Self {
            list_changed: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResourcesCapability {
    subscribe: bool,
    #[serde(rename = "listChanged")]
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<ToolDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ListResourcesResult {
    resources: Vec<ResourceDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResourceDescriptor {
    uri: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

#[derive(Debug, Serialize)]
struct ReadResourceResult {
    contents: Vec<ResourceContents>,
}

#[derive(Debug, Serialize)]
struct ResourceContents {
    uri: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct ResourceTemplateListResult {
    #[serde(rename = "resourceTemplates")]
    resource_templates: Vec<Value>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct PromptListResult {
    prompts: Vec<PromptDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct PromptDescriptor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    arguments: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PromptGetParams {
    name: String,
}

#[derive(Debug, Serialize)]
struct GetPromptResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Serialize)]
struct PromptMessage {
    role: String,
    content: PromptContent,
}

#[derive(Debug, Serialize)]
struct PromptContent {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|err| err.to_string())
}
