use std::{collections::HashMap, future::Future, pin::Pin};

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolRequestParam, CallToolResult};

use super::server::MemegenMcpServer;

pub type ToolFuture = Pin<Box<dyn Future<Output = Result<CallToolResult, McpError>> + Send>>;

pub type ToolHandler = fn(&MemegenMcpServer, CallToolRequestParam) -> ToolFuture;

/// Registry mapping tool names to handler functions.
pub struct Registry {
    pub tools: HashMap<&'static str, ToolHandler>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register_tool(&mut self, name: &'static str, handler: ToolHandler) {
        self.tools.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<ToolHandler> {
        self.tools.get(name).copied()
    }
}
