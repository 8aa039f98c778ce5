//! Simple stdio MCP client exercising the PDS Registry server.
//!
//! Usage:
//!   cargo run -p pds-mcp --example stdio_client -- [--tool <name>] [--json '{...}']
//!
//! Examples:
//!   # List the tools exposed by the server
//!   cargo run -p pds-mcp --example stdio_client
//!
//!   # Search investigations about the Moon
//!   cargo run -p pds-mcp --example stdio_client -- --tool search_investigations --json '{"keywords":["moon"],"limit":3}'

use anyhow::{Context, Result};
use rmcp::{
    model::CallToolRequestParams,
    service::ServiceExt as _,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::Value as JsonValue;
use std::env;
use tokio::process::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (tool_name, tool_args) = parse_flags(&args);

    // Spawn the server binary over stdio.
    let command = Command::new(env!("CARGO"));
    let transport = TokioChildProcess::new(command.configure(|cmd| {
        cmd.args(["run", "--quiet", "-p", "pds-cli", "--bin", "pds-mcp-server"]);
    }))
    .context("failed to spawn pds-mcp-server")?;

    // Connect the client service (no-op service type `()`)
    let running = ().serve(transport).await?;
    let peer = running.peer().clone();

    let tools = peer.list_all_tools().await.context("failed to list tools")?;
    println!("Discovered {} tool(s):", tools.len());
    for tool in &tools {
        println!("- {}: {}", tool.name, tool.description.clone().unwrap_or_default());
    }

    if let Some(name) = tool_name {
        let arguments = tool_args
            .and_then(|s| serde_json::from_str::<JsonValue>(&s).ok())
            .and_then(|v| v.as_object().cloned());

        let result = peer
            .call_tool(CallToolRequestParams { name: name.into(), arguments, meta: None, task: None })
            .await
            .context("tool invocation failed")?;
        println!("\nTool result:\n{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn parse_flags(args: &[String]) -> (Option<String>, Option<String>) {
    let mut tool_name = None;
    let mut tool_args = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tool" => {
                if i + 1 < args.len() {
                    tool_name = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--json" => {
                if i + 1 < args.len() {
                    tool_args = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    (tool_name, tool_args)
}
