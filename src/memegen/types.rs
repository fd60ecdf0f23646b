//! Shared types used by the memegen client and the MCP handlers.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Line count reported for templates that do not declare one.
pub const DEFAULT_TEMPLATE_LINES: u32 = 2;

/// Errors returned while interacting with the memegen API.
#[derive(Debug, Error)]
pub enum MemegenError {
    /// Base URL failed to parse or could not carry a path.
    #[error("Invalid memegen URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before a usable response was received, or the body failed to decode.
    #[error("Failed to fetch {context}: {source}")]
    Http {
        /// What was being fetched.
        context: String,
        /// Underlying transport or decoding error.
        #[source]
        source: reqwest::Error,
    },
    /// memegen responded with an unexpected status code.
    #[error("Failed to fetch {context}: unexpected response ({status}): {body}")]
    UnexpectedStatus {
        /// What was being fetched.
        context: String,
        /// HTTP status returned by memegen.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// Meme template as published by memegen, decoded for the listing and search projections.
///
/// Every field except `id` tolerates being absent or `null`, so one sparse row cannot fail a whole
/// listing. Fields the server does not model explicitly are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Opaque template identifier used in image paths.
    pub id: String,
    /// Human readable template name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of text lines the template expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    /// Number of image overlays supported by the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlays: Option<u32>,
    /// Style variants available for the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    /// URL of the template rendered without text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank: Option<String>,
    /// Sample rendering of the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<TemplateExample>,
    /// Where the meme originated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Search keywords attached to the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Remaining upstream fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Example text and rendered image for a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateExample {
    /// Text lines used for the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    /// Rendered example image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Compact template projection returned by the listing and search tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    /// Template identifier.
    pub id: String,
    /// Template name.
    pub name: String,
    /// Expected line count, defaulting to two.
    pub lines: u32,
    /// Example image URL, falling back to the blank template.
    pub example: String,
    /// Keywords, empty when the template has none.
    pub keywords: Vec<String>,
}

impl Template {
    /// Whether the query appears in the template's id, name, or keywords, ignoring case.
    ///
    /// Matching runs over `"<id> <name> <keywords...>"`, so a query may span adjacent fields.
    pub fn matches_query(&self, query: &str) -> bool {
        let keywords = self.keywords.as_deref().unwrap_or_default().join(" ");
        let name = self.name.as_deref().unwrap_or_default();
        let haystack = format!("{} {} {}", self.id, name, keywords).to_lowercase();
        haystack.contains(&query.to_lowercase())
    }
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        let lines = template
            .lines
            .filter(|&count| count > 0)
            .unwrap_or(DEFAULT_TEMPLATE_LINES);
        let example = template
            .example
            .as_ref()
            .and_then(|example| example.url.as_deref())
            .filter(|url| !url.is_empty())
            .or(template.blank.as_deref())
            .unwrap_or_default()
            .to_string();

        Self {
            id: template.id.clone(),
            name: template.name.clone().unwrap_or_default(),
            lines,
            example,
            keywords: template.keywords.clone().unwrap_or_default(),
        }
    }
}
