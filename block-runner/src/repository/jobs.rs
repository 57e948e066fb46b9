//! Jobs repository
//!
//! Handles communication with the Block API for job-related operations:
//! - Submitting actions (which queue a job)
//! - Reading job status

use async_trait::async_trait;
use block_client::{BlockClient, ClientError};
use block_core::domain::job::Job;
use block_core::dto::action::{ActionRequest, ActionResponse};
use std::sync::Arc;

/// Repository trait for job-related operations with the Block API
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Submits an action, returning the service's answer as-is
    ///
    /// # Arguments
    /// * `request` - The action request
    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionResponse, ClientError>;

    /// Reads the current state of a job
    ///
    /// # Arguments
    /// * `job_id` - The ID of the job to read
    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError>;
}

/// HTTP implementation of JobRepository
pub struct HttpJobRepository {
    client: Arc<BlockClient>,
}

impl HttpJobRepository {
    /// Creates a new HTTP job repository
    pub fn new(client: Arc<BlockClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for HttpJobRepository {
    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionResponse, ClientError> {
        self.client.submit_action(request).await
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError> {
        self.client.get_job(job_id).await
    }
}
