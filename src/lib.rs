#![deny(missing_docs)]

//! Core library for the memegen MCP server.

/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// memegen.link API integration and meme URL construction.
pub mod memegen;
