//! memegen.link integration: template lookups and meme URL construction.

use async_trait::async_trait;
use serde_json::Value;

pub mod client;
pub mod types;
pub mod url_builder;

pub use client::MemegenClient;
pub use types::{MemegenError, Template, TemplateExample, TemplateSummary};
pub use url_builder::{ImageExtension, MemeRequest, UrlBuilder, encode_text};

/// Source of meme templates consulted by the MCP tools.
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// List templates, optionally constrained server-side by `filter` and `animated`.
    async fn list_templates(
        &self,
        filter: Option<&str>,
        animated: Option<bool>,
    ) -> Result<Vec<Template>, MemegenError>;

    /// Fetch one template document by id, exactly as memegen returned it.
    ///
    /// `Ok(None)` means the template does not exist.
    async fn get_template(&self, template_id: &str) -> Result<Option<Value>, MemegenError>;
}
