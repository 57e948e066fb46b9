//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod connections;
mod run;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use block_runner::{OperationKind, RunnerConfig};

/// Arguments shared by every operation command
#[derive(clap::Args)]
pub struct BatchArgs {
    /// JSON file with the input items, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Record failing items as errors and keep going
    #[arg(long, env = "BLOCK_CONTINUE_ON_FAIL")]
    continue_on_fail: bool,
}

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Book an appointment for each input item
    Book {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Get available appointment slots for each input item
    Availability {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Run an operation by name (bookAppointment, getAvailability)
    Run {
        /// Operation name
        #[arg(short, long)]
        operation: String,

        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Verify the API credentials
    Connections,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The runner configuration
pub async fn handle_command(command: Commands, config: &RunnerConfig) -> Result<()> {
    match command {
        Commands::Book { batch } => {
            run::handle_run(OperationKind::BookAppointment, batch, config).await
        }
        Commands::Availability { batch } => {
            run::handle_run(OperationKind::GetAvailability, batch, config).await
        }
        Commands::Run { operation, batch } => {
            let kind: OperationKind = operation.parse()?;
            run::handle_run(kind, batch, config).await
        }
        Commands::Connections => connections::handle_connections(config).await,
    }
}
