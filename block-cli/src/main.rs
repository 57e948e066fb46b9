//! Block CLI
//!
//! Command-line host for the Block booking operations: feeds a batch of
//! input items through an operation and prints the resulting records.

mod commands;
mod input;

use anyhow::Result;
use block_client::DEFAULT_BASE_URL;
use block_core::domain::polling::{PollConfig, secs_to_duration};
use block_runner::RunnerConfig;
use clap::Parser;
use commands::{Commands, handle_command};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "block")]
#[command(about = "Book appointments and check availability using the Block API", long_about = None)]
struct Cli {
    /// Block API key
    #[arg(long, env = "BLOCK_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Block API base URL
    #[arg(long, env = "BLOCK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Timeout for a single HTTP call, in seconds
    #[arg(long, env = "BLOCK_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Default poll interval, in seconds
    #[arg(long, env = "BLOCK_POLL_INTERVAL", default_value_t = 2.0)]
    poll_interval: f64,

    /// Default poll timeout, in seconds
    #[arg(long, env = "BLOCK_POLL_TIMEOUT", default_value_t = 180.0)]
    poll_timeout: f64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "block_cli=info,block_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = cli.runner_config();
    config.validate()?;

    handle_command(cli.command, &config).await
}

impl Cli {
    /// Runner configuration from the global flags and their `BLOCK_*` variables
    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
            poll: PollConfig::new(
                secs_to_duration(self.poll_interval),
                secs_to_duration(self.poll_timeout),
            ),
        }
    }
}
