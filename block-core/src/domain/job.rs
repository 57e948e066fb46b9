//! Job domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code reported when a failed job carries none
pub const UNKNOWN_ERROR_CODE: &str = "unknown_error";

/// Error message reported when a failed job carries none
pub const DEFAULT_ERROR_MESSAGE: &str = "The job could not be completed";

/// Status of a remote job
///
/// The remote pipeline moves a job through
/// `queued -> leased -> in_progress -> waiting_2fa` before it settles on
/// `success` or `error`. Anything this side does not recognise maps to
/// [`JobStatus::Unknown`] and is treated like any other non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Leased,
    InProgress,
    #[serde(rename = "waiting_2fa")]
    Waiting2fa,
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Once a job reaches a terminal status it never changes again
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobStatus::Queued => "queued",
            JobStatus::Leased => "leased",
            JobStatus::InProgress => "in_progress",
            JobStatus::Waiting2fa => "waiting_2fa",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Snapshot of a remote job as read from the job resource
///
/// `payload` is the document exactly as the service returned it. It is what
/// callers receive on success, including any result fields this crate does
/// not model.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub payload: Value,
}

impl Job {
    /// Builds a job snapshot from the raw job document
    pub fn from_payload(id: impl Into<String>, payload: Value) -> Self {
        let status = payload
            .get("status")
            .cloned()
            .and_then(|status| serde_json::from_value(status).ok())
            .unwrap_or(JobStatus::Unknown);

        Self {
            id: id.into(),
            status,
            error_code: non_empty_str(&payload, "errorCode"),
            error_message: non_empty_str(&payload, "errorMessage"),
            payload,
        }
    }

    /// Remote error code, or `unknown_error` when the job did not supply one
    pub fn error_code(&self) -> &str {
        self.error_code.as_deref().unwrap_or(UNKNOWN_ERROR_CODE)
    }

    /// Remote error message, or a generic message when the job did not supply one
    pub fn error_message(&self) -> &str {
        self.error_message
            .as_deref()
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
    }

    /// Consumes the snapshot, returning the raw job document
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

fn non_empty_str(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
