//! Handlers for the template discovery tools: `list_templates`, `search_templates`, and
//! `get_template_info`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_arguments, upstream_error};
use crate::{
    mcp::format::json_text_result,
    memegen::{MemegenError, TemplateCatalog, TemplateSummary},
};

pub(crate) const LIST_TEMPLATES: &str = "list_templates";
pub(crate) const SEARCH_TEMPLATES: &str = "search_templates";
pub(crate) const GET_TEMPLATE_INFO: &str = "get_template_info";

/// Request payload for the `list_templates` tool.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListTemplatesRequest {
    /// Server-side name filter.
    #[serde(default)]
    pub(crate) filter: Option<String>,
    /// Restrict to animated templates.
    #[serde(default)]
    pub(crate) animated: Option<bool>,
}

/// Request payload for the `search_templates` tool.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchTemplatesRequest {
    /// Substring matched against id, name, and keywords.
    pub(crate) query: String,
}

/// Request payload for the `get_template_info` tool.
#[derive(Debug, Deserialize)]
pub(crate) struct GetTemplateInfoRequest {
    /// Template to describe.
    pub(crate) template_id: String,
}

/// Outcome of `get_template_info`: the upstream document untouched, or an error object when the
/// template does not exist.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum TemplateInfo {
    Found(Value),
    Missing { error: String },
}

pub(crate) async fn list_templates(
    catalog: &dyn TemplateCatalog,
    request: &ListTemplatesRequest,
) -> Result<Vec<TemplateSummary>, MemegenError> {
    let templates = catalog
        .list_templates(request.filter.as_deref(), request.animated)
        .await?;
    Ok(templates.iter().map(TemplateSummary::from).collect())
}

/// Search the complete template list locally; results keep upstream order.
pub(crate) async fn search_templates(
    catalog: &dyn TemplateCatalog,
    query: &str,
) -> Result<Vec<TemplateSummary>, MemegenError> {
    let templates = catalog.list_templates(None, None).await?;
    let matches: Vec<TemplateSummary> = templates
        .iter()
        .filter(|template| template.matches_query(query))
        .map(TemplateSummary::from)
        .collect();
    tracing::debug!(
        query,
        total = templates.len(),
        matched = matches.len(),
        "Searched templates"
    );
    Ok(matches)
}

pub(crate) async fn template_info(
    catalog: &dyn TemplateCatalog,
    template_id: &str,
) -> Result<TemplateInfo, MemegenError> {
    Ok(match catalog.get_template(template_id).await? {
        Some(document) => TemplateInfo::Found(document),
        None => TemplateInfo::Missing {
            error: format!("Template '{template_id}' not found"),
        },
    })
}

/// Handle the `list_templates` tool.
pub(crate) async fn handle_list_templates(
    catalog: &Arc<dyn TemplateCatalog>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: ListTemplatesRequest = parse_arguments(LIST_TEMPLATES, arguments)?;
    let summaries = list_templates(catalog.as_ref(), &args)
        .await
        .map_err(|err| upstream_error(LIST_TEMPLATES, err))?;
    Ok(json_text_result(&summaries, LIST_TEMPLATES))
}

/// Handle the `search_templates` tool.
pub(crate) async fn handle_search_templates(
    catalog: &Arc<dyn TemplateCatalog>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: SearchTemplatesRequest = parse_arguments(SEARCH_TEMPLATES, arguments)?;
    let matches = search_templates(catalog.as_ref(), &args.query)
        .await
        .map_err(|err| upstream_error(SEARCH_TEMPLATES, err))?;
    Ok(json_text_result(&matches, SEARCH_TEMPLATES))
}

/// Handle the `get_template_info` tool.
pub(crate) async fn handle_get_template_info(
    catalog: &Arc<dyn TemplateCatalog>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: GetTemplateInfoRequest = parse_arguments(GET_TEMPLATE_INFO, arguments)?;
    let info = template_info(catalog.as_ref(), &args.template_id)
        .await
        .map_err(|err| upstream_error(GET_TEMPLATE_INFO, err))?;
    Ok(json_text_result(&info, GET_TEMPLATE_INFO))
}
