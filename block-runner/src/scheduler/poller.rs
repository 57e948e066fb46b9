//! Job poller
//!
//! Submits an action, then reads the resulting job at a fixed interval until
//! it settles on `success` or `error`, or until the poll timeout elapses.
//!
//! A job is polled by exactly one caller and nothing is shared between
//! polls. The only suspension points are the status reads and the delay
//! between them; the loop ends only through one of its own terminal states.

use block_core::domain::action::ActionType;
use block_core::domain::job::{Job, JobStatus};
use block_core::domain::polling::PollConfig;
use block_core::dto::action::ActionRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::error::JobError;
use crate::repository::JobRepository;

/// Classification of one status read
#[derive(Debug)]
enum PollState {
    Pending(JobStatus),
    Success(Job),
    Failed(Job),
}

impl PollState {
    fn classify(job: Job) -> Self {
        match job.status {
            JobStatus::Success => PollState::Success(job),
            JobStatus::Error => PollState::Failed(job),
            status => PollState::Pending(status),
        }
    }
}

/// Submits actions and polls their jobs to completion
#[derive(Clone)]
pub struct JobPoller {
    repository: Arc<dyn JobRepository>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    /// Submits an action and waits for its job to settle
    pub async fn run(&self, request: &ActionRequest, config: &PollConfig) -> Result<Job, JobError> {
        let job_id = self.submit(request).await?;
        self.wait_for_completion(request.action, &job_id, config)
            .await
    }

    /// Submits an action, returning the identifier of the queued job
    ///
    /// A response without a job identifier is fatal; no status read is
    /// attempted for it.
    pub async fn submit(&self, request: &ActionRequest) -> Result<String, JobError> {
        let response = self
            .repository
            .submit_action(request)
            .await
            .map_err(|source| JobError::Client {
                action: request.action,
                source,
            })?;

        let Some(job_id) = response.job_id() else {
            warn!(
                "{} action on connection {} returned no job ID",
                request.action, request.connection_id
            );
            return Err(JobError::Submission {
                action: request.action,
            });
        };

        info!("Submitted {} action, job {}", request.action, job_id);
        Ok(job_id.to_string())
    }

    /// Polls a job until it reaches a terminal status or `config.timeout` elapses
    ///
    /// The timeout is checked before every read and each read is cut off
    /// when the remaining budget runs out, so a job that never settles fails
    /// no earlier than the timeout and at most one interval after it. Failed
    /// reads are retried after the normal interval.
    pub async fn wait_for_completion(
        &self,
        action: ActionType,
        job_id: &str,
        config: &PollConfig,
    ) -> Result<Job, JobError> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if started.elapsed() >= config.timeout {
                warn!(
                    "Job {} still pending after {} read(s), giving up after {:?}",
                    job_id, attempts, config.timeout
                );
                return Err(JobError::Timeout {
                    job_id: job_id.to_string(),
                    timeout: config.timeout,
                });
            }

            attempts += 1;

            let remaining = config.timeout.saturating_sub(started.elapsed());
            let read = time::timeout(remaining, self.repository.fetch_job(job_id)).await;

            match read {
                Err(_) => {
                    warn!(
                        "Read {} of job {} outlived the poll timeout",
                        attempts, job_id
                    );
                    continue;
                }
                Ok(Ok(job)) => match PollState::classify(job) {
                    PollState::Success(job) => {
                        info!("Job {} succeeded after {} read(s)", job_id, attempts);
                        return Ok(job);
                    }
                    PollState::Failed(job) => {
                        warn!(
                            "Job {} failed with code {}: {}",
                            job_id,
                            job.error_code(),
                            job.error_message()
                        );
                        return Err(JobError::JobFailed {
                            action,
                            job_id: job_id.to_string(),
                            code: job.error_code().to_string(),
                            message: job.error_message().to_string(),
                        });
                    }
                    PollState::Pending(status) => {
                        debug!("Job {} is {} (read {})", job_id, status, attempts);
                    }
                },
                Ok(Err(e)) => {
                    warn!(
                        "Failed to read job {} (read {}), retrying: {}",
                        job_id, attempts, e
                    );
                }
            }

            pause(config.interval).await;
        }
    }
}

/// Waits between two reads; a zero interval only yields to the scheduler
async fn pause(interval: Duration) {
    if interval.is_zero() {
        tokio::task::yield_now().await;
    } else {
        time::sleep(interval).await;
    }
}
