//! Operations
//!
//! An operation turns one input item into an action payload. Both operations
//! share the same submit-and-poll flow; only their input fields and payload
//! shape differ, so that is all an [`Operation`] implementation provides.
//!
//! An input item is a JSON object carrying `connectionId`, the operation's
//! own fields and optionally `pollInterval` / `pollTimeout` in seconds.

mod book_appointment;
mod get_availability;
mod input;

pub use book_appointment::{
    BookAppointment, BookAppointmentInput, CustomerInput, ServiceAddressInput,
};
pub use get_availability::{BusinessHoursInput, GetAvailability, GetAvailabilityInput};
pub use input::{IntegerInput, ItemInput};

use block_core::domain::action::ActionType;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

use crate::error::JobError;

/// Payload builder for one kind of action
pub trait Operation {
    /// Action submitted for every item
    const ACTION: ActionType;

    /// Operation-specific fields of an input item
    type Input: DeserializeOwned;

    /// Validates the fields and builds the action payload
    fn build_payload(input: &Self::Input) -> Result<Value, JobError>;
}

/// Operation named by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    BookAppointment,
    GetAvailability,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::BookAppointment => "bookAppointment",
            OperationKind::GetAvailability => "getAvailability",
        }
    }
}

/// The host asked for an operation this runner does not provide
#[derive(Debug, Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bookAppointment" => Ok(OperationKind::BookAppointment),
            "getAvailability" => Ok(OperationKind::GetAvailability),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_payload<T: Serialize>(payload: &T) -> Result<Value, JobError> {
    serde_json::to_value(payload)
        .map_err(|e| JobError::invalid_input(format!("Failed to encode payload: {}", e)))
}

/// Returns the trimmed value, or `None` when absent or blank
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn require(field: &str, value: &str) -> Result<String, JobError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(JobError::invalid_input(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
