//! Tool, prompt and resource definitions for the BIN lookup server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::bin_lookup::client::BinListClient;
use crate::bin_lookup::validation::validate_bin;
use crate::mcp::registry::{parse_arguments, StaticPrompt, StaticResource, ToolDescriptor, ToolHandler};
use crate::mcp::ToolResult;

pub const LOOKUP_CARD_TOOL: &str = "lookup_card";
pub const VALIDATE_BIN_TOOL: &str = "validate_bin";

pub const BIN_LOOKUP_PROMPT: &str = "card://bin-lookup";
pub const BIN_LOOKUP_RESOURCE_URI: &str = "card://bin-lookup";

pub const BIN_LOOKUP_PROMPT_TEXT: &str = concat!(
    "You are a secure card lookup assistant. Ask the user to enter only the first 6 digits of a card (BIN/IIN). ",
    "Do not ask for or accept full card numbers. When using the 'lookup_card' tool, only pass 6-digit BINs."
);

pub const BIN_LOOKUP_RESOURCE_TEXT: &str = concat!(
    "To look up card details, ask the user to provide only the first 6 digits of their card number. ",
    "These 6 digits are known as the Bank Identification Number (BIN). ",
    "Do not ask for or use the full card number. ",
    "Once you have a 6-digit BIN, use the 'lookup_card' tool to retrieve card metadata."
);

#[derive(Debug, Deserialize)]
struct BinArgs {
    bin: String,
}

fn bin_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "bin": { "type": "string", "description": description }
        },
        "required": ["bin"]
    })
}

/// `lookup_card`: proxies one BIN to the metadata provider.
pub struct LookupCardTool {
    client: BinListClient,
}

impl LookupCardTool {
    pub fn new(client: BinListClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for LookupCardTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: LOOKUP_CARD_TOOL.to_string(),
            description: "Lookup metadata for a credit/debit card BIN (6-digit Bank Identification Number)."
                .to_string(),
            input_schema: bin_schema("The first 6 digits of the card number"),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> ToolResult {
        let args = match parse_arguments::<BinArgs>(arguments) {
            Ok(args) => args,
            Err(err) => return ToolResult::error(err),
        };
        ToolResult::from_outcome(self.client.lookup_card(&args.bin).await)
    }
}

/// `validate_bin`: length-only check, no network access.
pub struct ValidateBinTool;

#[async_trait]
impl ToolHandler for ValidateBinTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: VALIDATE_BIN_TOOL.to_string(),
            description: "Validate that the input is a 6-digit BIN.".to_string(),
            input_schema: bin_schema("Candidate BIN to validate"),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> ToolResult {
        match parse_arguments::<BinArgs>(arguments) {
            Ok(args) => ToolResult::json(Value::Bool(validate_bin(&args.bin))),
            Err(err) => ToolResult::error(err),
        }
    }
}

pub fn bin_lookup_prompt() -> StaticPrompt {
    StaticPrompt {
        name: BIN_LOOKUP_PROMPT.to_string(),
        description: Some(
            "A secure system prompt to guide AI behavior during card lookups.".to_string(),
        ),
        text: BIN_LOOKUP_PROMPT_TEXT.to_string(),
    }
}

pub fn bin_lookup_resource() -> StaticResource {
    StaticResource {
        uri: BIN_LOOKUP_RESOURCE_URI.to_string(),
        name: "get_bin_lookup_instruction".to_string(),
        description: Some(
            "Tells the model to request only the first 6 digits of a card number (BIN)."
                .to_string(),
        ),
        mime_type: "text/plain".to_string(),
        text: BIN_LOOKUP_RESOURCE_TEXT.to_string(),
    }
}
