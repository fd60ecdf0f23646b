//! Tool handlers for the MCP server.

use rmcp::{ErrorData as McpError, model::JsonObject};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::memegen::MemegenError;

pub mod meme;
pub mod templates;

/// Parse structured arguments supplied to a tool invocation.
///
/// Missing arguments are treated as an empty object so tools without required fields accept them.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    let value = arguments
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(JsonObject::new()));
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(tool, error = %err, "Rejected tool arguments");
        McpError::invalid_params(
            format!("Invalid arguments for {tool}: {err}"),
            Some(json!({ "tool": tool })),
        )
    })
}

/// Convert an upstream failure into an MCP internal error.
pub(crate) fn upstream_error(tool: &str, err: MemegenError) -> McpError {
    tracing::warn!(tool, error = %err, "Upstream request failed");
    McpError::internal_error(err.to_string(), Some(json!({ "tool": tool })))
}
