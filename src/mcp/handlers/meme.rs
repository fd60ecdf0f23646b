//! Handler for the `create_meme` tool.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use serde::{Deserialize, Serialize};

use super::parse_arguments;
use crate::{
    mcp::format::json_text_result,
    memegen::{ImageExtension, MemeRequest, UrlBuilder},
};

pub(crate) const CREATE_MEME: &str = "create_meme";

/// Request payload accepted by the `create_meme` tool.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateMemeRequest {
    /// Template to render.
    pub(crate) template_id: String,
    /// Text for the top of the meme.
    #[serde(default)]
    pub(crate) top_text: Option<String>,
    /// Text for the bottom of the meme.
    #[serde(default)]
    pub(crate) bottom_text: Option<String>,
    /// Explicit lines for templates with more than two slots; wins over top/bottom when non-empty.
    #[serde(default)]
    pub(crate) text_lines: Option<Vec<String>>,
    /// Optional template style.
    #[serde(default)]
    pub(crate) style: Option<String>,
    /// Optional font.
    #[serde(default)]
    pub(crate) font: Option<String>,
    /// Output format, `png` unless specified.
    #[serde(default)]
    pub(crate) extension: ImageExtension,
}

/// Response payload for `create_meme`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateMemeResponse {
    pub(crate) url: String,
    pub(crate) template_id: String,
}

impl CreateMemeRequest {
    /// Resolve the ordered text lines for the meme.
    ///
    /// Non-empty `text_lines` are used verbatim. Otherwise top then bottom text are used when
    /// present and non-empty. With no text at all, two empty lines keep the top/bottom slots.
    pub(crate) fn resolve_lines(&self) -> Vec<String> {
        if let Some(lines) = self.text_lines.as_ref().filter(|lines| !lines.is_empty()) {
            return lines.clone();
        }

        let lines: Vec<String> = [&self.top_text, &self.bottom_text]
            .into_iter()
            .flatten()
            .filter(|text| !text.is_empty())
            .cloned()
            .collect();

        if lines.is_empty() {
            vec![String::new(), String::new()]
        } else {
            lines
        }
    }

    pub(crate) fn into_meme_request(self) -> MemeRequest {
        let lines = self.resolve_lines();
        MemeRequest {
            template_id: self.template_id,
            lines,
            style: self.style,
            font: self.font,
            extension: self.extension,
        }
    }
}

/// Handle the `create_meme` tool. Builds the image URL locally without contacting memegen.
pub(crate) fn handle_create_meme(
    urls: &UrlBuilder,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: CreateMemeRequest = parse_arguments(CREATE_MEME, arguments)?;
    let meme = args.into_meme_request();
    let url = urls.build(&meme);
    tracing::debug!(template_id = %meme.template_id, lines = meme.lines.len(), %url, "Built meme URL");

    Ok(json_text_result(
        &CreateMemeResponse {
            url,
            template_id: meme.template_id,
        },
        CREATE_MEME,
    ))
}
