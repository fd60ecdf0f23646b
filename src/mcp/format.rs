//! Formatting helpers shared across MCP handlers.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Serialize a value to pretty JSON, falling back to compact formatting on error.
pub(crate) fn serialize_json<T: Serialize>(value: &T, context: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::warn!(context, %error, "Failed to serialize JSON prettily");
        serde_json::to_string(value).unwrap_or_else(|_| "{}".into())
    })
}

/// Wrap a serializable payload as a successful tool result carrying one text item.
pub(crate) fn json_text_result<T: Serialize>(value: &T, tool: &str) -> CallToolResult {
    CallToolResult::success(vec![Content::text(serialize_json(value, tool))])
}
