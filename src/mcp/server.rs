//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        handlers::{
            meme::{CREATE_MEME, handle_create_meme},
            templates::{
                GET_TEMPLATE_INFO, LIST_TEMPLATES, SEARCH_TEMPLATES, handle_get_template_info,
                handle_list_templates, handle_search_templates,
            },
        },
        registry, schemas,
    },
    memegen::{MemegenClient, TemplateCatalog, UrlBuilder},
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorCode, ListToolsResult, ServerCapabilities,
        ServerInfo, Tool, ToolAnnotations,
    },
};

/// MCP server exposing memegen template lookups and meme URL generation.
#[derive(Clone)]
pub struct MemegenMcpServer {
    catalog: Arc<dyn TemplateCatalog>,
    urls: UrlBuilder,
    registry: Arc<registry::Registry>,
}

impl MemegenMcpServer {
    /// Create a server backed by the memegen HTTP client; image links share the client's base URL.
    pub fn new(client: MemegenClient) -> Self {
        let urls = UrlBuilder::new(client.base_url());
        Self::with_catalog(Arc::new(client), urls)
    }

    /// Create a server backed by any template catalog.
    pub fn with_catalog(catalog: Arc<dyn TemplateCatalog>, urls: UrlBuilder) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_tool(LIST_TEMPLATES, tool_list_templates);
        registry.register_tool(SEARCH_TEMPLATES, tool_search_templates);
        registry.register_tool(GET_TEMPLATE_INFO, tool_get_template_info);
        registry.register_tool(CREATE_MEME, tool_create_meme);

        Self {
            catalog,
            urls,
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed(LIST_TEMPLATES),
                title: Some("List Templates".to_string()),
                description: Some(Cow::Borrowed(
                    "List available meme templates from memegen.link",
                )),
                input_schema: Arc::new(schemas::list_templates_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("List Templates")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(true),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(CREATE_MEME),
                title: Some("Create Meme".to_string()),
                description: Some(Cow::Borrowed("Generate a meme image URL with custom text")),
                input_schema: Arc::new(schemas::create_meme_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Create Meme")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(SEARCH_TEMPLATES),
                title: Some("Search Templates".to_string()),
                description: Some(Cow::Borrowed("Search for meme templates by keyword")),
                input_schema: Arc::new(schemas::search_templates_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Search Templates")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(true),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(GET_TEMPLATE_INFO),
                title: Some("Template Info".to_string()),
                description: Some(Cow::Borrowed(
                    "Get detailed information about a specific meme template",
                )),
                input_schema: Arc::new(schemas::get_template_info_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Template Info")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(true),
                ),
                icons: None,
            },
        ]
    }
}

fn tool_list_templates(
    server: &MemegenMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let catalog = server.catalog.clone();
    Box::pin(async move { handle_list_templates(&catalog, request.arguments).await })
}

fn tool_search_templates(
    server: &MemegenMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let catalog = server.catalog.clone();
    Box::pin(async move { handle_search_templates(&catalog, request.arguments).await })
}

fn tool_get_template_info(
    server: &MemegenMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let catalog = server.catalog.clone();
    Box::pin(async move { handle_get_template_info(&catalog, request.arguments).await })
}

fn tool_create_meme(
    server: &MemegenMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let urls = server.urls.clone();
    Box::pin(async move { handle_create_meme(&urls, request.arguments) })
}

impl ServerHandler for MemegenMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "memegen-mcp".to_string();
        implementation.title = Some("Memegen MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: implementation,
            instructions: Some(
                "Find a template with search_templates or list_templates, check its line count with get_template_info, then call create_meme to get a shareable image URL.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let Some(handler) = self.registry.get(request.name.as_ref()) else {
                tracing::warn!(tool = %request.name, "Unknown tool requested");
                return Err(McpError::new(
                    ErrorCode::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", request.name),
                    None,
                ));
            };

            tracing::debug!(tool = %request.name, "Handling tool call");
            let tool = request.name.clone();
            let result = handler(self, request).await;
            if let Err(error) = &result {
                tracing::debug!(%tool, code = ?error.code, message = %error.message, "Tool call failed");
            }
            result
        }
    }
}
