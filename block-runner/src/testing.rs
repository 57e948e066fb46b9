//! Scripted in-memory repository for tests

use async_trait::async_trait;
use block_client::ClientError;
use block_core::domain::job::Job;
use block_core::dto::action::{ActionRequest, ActionResponse};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::repository::JobRepository;

/// One scripted answer to a status read
#[derive(Debug, Clone)]
pub(crate) enum ScriptedRead {
    /// The read succeeds with this job document
    Payload(Value),
    /// The read fails at the transport level
    Unreachable,
    /// The read hangs this long, then reports `queued`
    Stall(Duration),
}

impl ScriptedRead {
    pub(crate) fn status(status: &str) -> Self {
        Self::Payload(json!({ "status": status }))
    }

    pub(crate) fn payload(payload: Value) -> Self {
        Self::Payload(payload)
    }
}

enum ScriptedSubmission {
    Job(String),
    MissingJobId,
    Failure,
}

/// Answers submissions in order and reads from a per-job script
///
/// Once a job's script is exhausted every further read reports `queued`.
#[derive(Default)]
pub(crate) struct ScriptedRepository {
    submissions: Mutex<VecDeque<ScriptedSubmission>>,
    scripts: Mutex<HashMap<String, VecDeque<ScriptedRead>>>,
    submitted: Mutex<Vec<ActionRequest>>,
    reads: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Next submission returns `job_id`, whose reads follow `reads`
    pub(crate) fn with_job(self, job_id: &str, reads: Vec<ScriptedRead>) -> Self {
        self.submissions
            .lock()
            .unwrap()
            .push_back(ScriptedSubmission::Job(job_id.to_string()));
        self.scripts
            .lock()
            .unwrap()
            .insert(job_id.to_string(), reads.into());
        self
    }

    /// Next submission succeeds without a job ID
    pub(crate) fn with_missing_job_id(self) -> Self {
        self.submissions
            .lock()
            .unwrap()
            .push_back(ScriptedSubmission::MissingJobId);
        self
    }

    /// Next submission fails at the transport level
    pub(crate) fn with_failed_submission(self) -> Self {
        self.submissions
            .lock()
            .unwrap()
            .push_back(ScriptedSubmission::Failure);
        self
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    /// Offsets from `start` at which `job_id` was read
    pub(crate) fn read_offsets(&self, job_id: &str, start: Instant) -> Vec<Duration> {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == job_id)
            .map(|(_, at)| at.duration_since(start))
            .collect()
    }

    pub(crate) fn submitted(&self) -> Vec<ActionRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobRepository for ScriptedRepository {
    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionResponse, ClientError> {
        self.submitted.lock().unwrap().push(request.clone());

        let next = self.submissions.lock().unwrap().pop_front();
        match next {
            Some(ScriptedSubmission::Job(job_id)) => Ok(ActionResponse {
                job_id: Some(job_id),
            }),
            Some(ScriptedSubmission::MissingJobId) => Ok(ActionResponse::default()),
            Some(ScriptedSubmission::Failure) | None => {
                Err(ClientError::api_error(503, "service unavailable"))
            }
        }
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job, ClientError> {
        self.reads
            .lock()
            .unwrap()
            .push((job_id.to_string(), Instant::now()));

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(job_id)
            .and_then(VecDeque::pop_front);

        match next {
            Some(ScriptedRead::Stall(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(Job::from_payload(job_id, json!({ "status": "queued" })))
            }
            Some(ScriptedRead::Payload(payload)) => Ok(Job::from_payload(job_id, payload)),
            Some(ScriptedRead::Unreachable) => {
                Err(ClientError::ParseError("connection reset by peer".to_string()))
            }
            None => Ok(Job::from_payload(job_id, json!({ "status": "queued" }))),
        }
    }
}
