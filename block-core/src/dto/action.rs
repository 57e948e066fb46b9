//! Action submission DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::action::ActionType;

/// Body of `POST /v1/actions`
///
/// Immutable once built; one request is sent per input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: ActionType,
    pub connection_id: String,
    pub payload: Value,
}

impl ActionRequest {
    pub fn new(action: ActionType, connection_id: impl Into<String>, payload: Value) -> Self {
        Self {
            action,
            connection_id: connection_id.into(),
            payload,
        }
    }
}

/// Response of `POST /v1/actions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

impl ActionResponse {
    /// The job identifier, if the service returned a usable one
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref().filter(|id| !id.is_empty())
    }
}
