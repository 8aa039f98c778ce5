//! Model Context Protocol (MCP) server for the NASA PDS Registry.
//!
//! This crate exposes the `pds-registry` search, get, and crawl operations
//! as MCP tools, publishes the PDS4 context type enumerations as read-only
//! resources, and hosts the server over stdio or a local streamable-HTTP
//! endpoint.

pub mod server;

pub use server::{McpHttpServer, PdsMcpCore, RunningMcpHttpServer, resolve_bind_address, serve_stdio};
