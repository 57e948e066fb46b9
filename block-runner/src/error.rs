//! Error types for the runner
//!
//! Every [`JobError`] is fatal for the item it was raised on. Failed status
//! reads during polling are not errors at this level: the poller retries
//! them until the job settles or the timeout fires.

use block_client::ClientError;
use block_core::domain::action::ActionType;
use std::time::Duration;
use thiserror::Error;

/// Why a single item could not produce a job result
#[derive(Debug, Error)]
pub enum JobError {
    /// Item parameters are missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The action could not be submitted
    #[error("Failed to submit {action} action: {source}")]
    Client {
        action: ActionType,
        #[source]
        source: ClientError,
    },

    /// The action was accepted but no job identifier came back
    #[error("No job ID returned from the {} service", .action.service_label())]
    Submission { action: ActionType },

    /// The job did not reach a terminal status in time
    #[error("Job polling timed out after {} seconds. Job ID: {job_id}", .timeout.as_secs_f64())]
    Timeout { job_id: String, timeout: Duration },

    /// The job settled on `error`
    #[error(
        "{} job could not be completed. Job ID: {job_id}, Code: {code}: {message}",
        .action.job_label()
    )]
    JobFailed {
        action: ActionType,
        job_id: String,
        code: String,
        message: String,
    },
}

impl JobError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// A batch stopped at `item_index`; later items were not processed
#[derive(Debug, Error)]
#[error("Item {item_index}: {source}")]
pub struct ExecutionError {
    pub item_index: usize,
    #[source]
    pub source: JobError,
}
