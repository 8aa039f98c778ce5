mod core;
mod http;
mod resources;
mod schemas;

pub use core::{PdsMcpCore, serve_stdio};
pub use http::{McpHttpServer, RunningMcpHttpServer, resolve_bind_address};
