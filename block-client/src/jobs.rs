//! Job-related API endpoints

use crate::BlockClient;
use crate::error::{ClientError, Result};
use block_core::domain::job::Job;
use reqwest::RequestBuilder;
use serde_json::Value;

impl BlockClient {
    // =============================================================================
    // Jobs
    // =============================================================================

    /// Get the current state of a job
    ///
    /// # Arguments
    /// * `job_id` - The identifier returned by [`BlockClient::submit_action`]
    ///
    /// # Returns
    /// A snapshot of the job; its `payload` is the document as returned
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let response = self.job_request(job_id)?.send().await?;
        let payload: Value = self.handle_response(response).await?;

        job_from_payload(job_id, payload)
    }

    fn job_request(&self, job_id: &str) -> Result<RequestBuilder> {
        validate_job_id(job_id)?;
        Ok(self.get(&format!("/v1/jobs/{}", job_id)))
    }
}

fn job_from_payload(job_id: &str, payload: Value) -> Result<Job> {
    if !payload.is_object() {
        return Err(ClientError::ParseError(format!(
            "Expected a JSON object for job {}, got {}",
            job_id, payload
        )));
    }

    Ok(Job::from_payload(job_id, payload))
}

fn validate_job_id(job_id: &str) -> Result<()> {
    if job_id.is_empty() {
        return Err(ClientError::InvalidRequest("job id cannot be empty".to_string()));
    }
    if job_id.contains(['/', '?', '#']) {
        return Err(ClientError::InvalidRequest(format!(
            "job id contains reserved characters: {}",
            job_id
        )));
    }
    Ok(())
}
