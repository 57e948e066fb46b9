//! Operation command handler
//!
//! Loads the input items, runs the operation over them and prints one
//! record per item.

use anyhow::{Context, Result};
use block_client::BlockClient;
use block_core::dto::execution::ExecutionRecord;
use block_runner::{BatchExecutor, HttpJobRepository, OperationKind, RunnerConfig};
use colored::*;
use std::sync::Arc;
use tracing::info;

use super::BatchArgs;
use crate::input::load_items;

/// Run `kind` over the items named by `batch`
pub async fn handle_run(kind: OperationKind, batch: BatchArgs, config: &RunnerConfig) -> Result<()> {
    let items = load_items(&batch.input)?;

    info!("Running {} over {} item(s)", kind, items.len());

    let client = BlockClient::with_timeout(config.credentials(), config.request_timeout)
        .context("Failed to create Block API client")?;
    let repository = Arc::new(HttpJobRepository::new(Arc::new(client)));
    let executor = BatchExecutor::new(repository, config.poll);

    let records = executor
        .execute_kind(kind, &items, batch.continue_on_fail)
        .await
        .with_context(|| format!("{} failed", kind))?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    print_summary(&records);

    Ok(())
}

/// Items that failed, with their messages
fn failures(records: &[ExecutionRecord]) -> Vec<(usize, &str)> {
    records
        .iter()
        .filter(|r| r.is_error())
        .map(|r| (r.paired_item.item, r.error_message().unwrap_or("unknown error")))
        .collect()
}

fn print_summary(records: &[ExecutionRecord]) {
    let failed = failures(records);
    let succeeded = records.len() - failed.len();

    eprintln!();
    eprintln!(
        "{}",
        format!("✓ {} item(s) completed", succeeded).green().bold()
    );
    if !failed.is_empty() {
        eprintln!("{}", format!("✗ {} item(s) failed:", failed.len()).red().bold());
        for (item, message) in failed {
            eprintln!("  {} {}", format!("[{}]", item).dimmed(), message);
        }
    }
}
