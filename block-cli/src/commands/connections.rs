//! Credential check

use anyhow::{Context, Result};
use block_client::BlockClient;
use block_runner::RunnerConfig;
use colored::*;
use serde_json::Value;

/// List connections to confirm the API key is accepted
pub async fn handle_connections(config: &RunnerConfig) -> Result<()> {
    let client = BlockClient::with_timeout(config.credentials(), config.request_timeout)
        .context("Failed to create Block API client")?;

    let connections = client
        .list_connections()
        .await
        .with_context(|| format!("Credential check against {} failed", client.base_url()))?;

    eprintln!(
        "{}",
        format!("✓ Credentials accepted by {}", client.base_url())
            .green()
            .bold()
    );

    match connections_of(&connections) {
        Some(list) if list.is_empty() => println!("{}", "No connections found.".yellow()),
        Some(list) => {
            println!("{}", format!("Found {} connection(s):", list.len()).bold());
            for connection in list {
                print_connection(connection);
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&connections)?),
    }

    Ok(())
}

/// The connection list, whether returned bare or under a `data` key
fn connections_of(body: &Value) -> Option<&Vec<Value>> {
    body.as_array()
        .or_else(|| body.get("data").and_then(Value::as_array))
}

fn print_connection(connection: &Value) {
    let id = connection.get("id").and_then(Value::as_str).unwrap_or("?");
    let name = connection
        .get("name")
        .or_else(|| connection.get("platform"))
        .and_then(Value::as_str)
        .unwrap_or("");
    println!("  {} {}", id.cyan(), name);
}
