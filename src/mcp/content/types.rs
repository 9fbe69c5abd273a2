//! Core content types for MCP tool responses.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error record returned to the model in place of a payload.
///
/// Serializes as `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Content item in tool result (MCP spec compatible).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    /// Content type identifier
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ContentItem {
    /// Create text content item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result of a tool call (MCP spec compatible).
///
/// Every result carries the JSON rendering as a text item, plus the same
/// value as `structuredContent` for clients that read structured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result for any JSON value.
    ///
    /// Non-object values are wrapped as `{"result": value}` in the structured
    /// part, since structured content must be an object.
    pub fn json(value: Value) -> Self {
        let text = render(&value);
        let structured = match value {
            Value::Object(_) => value,
            other => json!({ "result": other }),
        };
        Self {
            content: vec![ContentItem::text(text)],
            structured_content: Some(structured),
            is_error: false,
        }
    }

    /// Error result carrying an [`ErrorRecord`].
    pub fn error(message: impl Into<String>) -> Self {
        let record = ErrorRecord::new(message);
        let value = json!({ "error": record.error });
        Self {
            content: vec![ContentItem::text(render(&value))],
            structured_content: Some(value),
            is_error: true,
        }
    }

    /// Turn an adapter outcome into a tool result. `Err` becomes an error
    /// record holding the error's display text.
    pub fn from_outcome<T, E>(outcome: Result<T, E>) -> Self
    where
        T: Serialize,
        E: Display,
    {
        match outcome {
            Ok(payload) => match serde_json::to_value(payload) {
                Ok(value) => Self::json(value),
                Err(err) => Self::error(format!("Failed to encode tool output: {err}")),
            },
            Err(err) => Self::error(err.to_string()),
        }
    }

    /// The error record, if this result is an error.
    pub fn error_record(&self) -> Option<ErrorRecord> {
        if !self.is_error {
            return None;
        }
        self.structured_content
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Text of the first content item.
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|item| item.text.as_str())
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_item_text() {
        let item = ContentItem::text("Hello world");
        assert_eq!(item.content_type, "text");
        assert_eq!(item.text, "Hello world");
    }

    #[test]
    fn test_tool_result_object() {
        let result = ToolResult::json(json!({ "scheme": "visa" }));
        assert!(!result.is_error);
        assert_eq!(result.structured_content, Some(json!({ "scheme": "visa" })));
        assert!(result.text().unwrap().contains("\"scheme\": \"visa\""));
    }

    #[test]
    fn test_tool_result_wraps_primitive() {
        let result = ToolResult::json(json!(true));
        assert_eq!(result.text(), Some("true"));
        assert_eq!(result.structured_content, Some(json!({ "result": true })));
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("Something went wrong");
        assert!(result.is_error);
        assert_eq!(
            result.error_record(),
            Some(ErrorRecord::new("Something went wrong"))
        );
    }

    #[test]
    fn test_from_outcome_uses_display_text() {
        let outcome: Result<Value, String> = Err("boom".to_string());
        let result = ToolResult::from_outcome(outcome);
        assert_eq!(result.error_record().unwrap().error, "boom");

        let outcome: Result<Value, String> = Ok(json!({ "a": 1 }));
        let result = ToolResult::from_outcome(outcome);
        assert!(result.error_record().is_none());
    }

    #[test]
    fn test_serialization_field_names() {
        let value = serde_json::to_value(ToolResult::error("x")).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["structuredContent"]["error"], "x");
        assert_eq!(value["content"][0]["type"], "text");
    }
}
