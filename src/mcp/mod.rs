//! Model Context Protocol (MCP) integration for memegen.
//!
//! This module exposes memegen.link to editors and agent hosts over stdio as four tools:
//! `list_templates`, `search_templates`, `get_template_info`, and `create_meme`. Each tool parses
//! its arguments into a typed request before doing any work and answers with one text item
//! holding pretty-printed JSON.
//!
//! Handlers, schemas, and formatting helpers are kept in focused submodules to make tests and
//! reviews small and targeted.

mod format;
mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::MemegenMcpServer;
