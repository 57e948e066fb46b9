//! Action domain types

use serde::{Deserialize, Serialize};

/// A typed remote operation submitted against a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    BookAppointment,
    GetAvailability,
}

impl ActionType {
    /// Human-readable name of the job this action produces, used in error messages
    pub fn job_label(&self) -> &'static str {
        match self {
            ActionType::BookAppointment => "Booking",
            ActionType::GetAvailability => "Availability check",
        }
    }

    /// Name of the remote service handling this action
    pub fn service_label(&self) -> &'static str {
        match self {
            ActionType::BookAppointment => "booking",
            ActionType::GetAvailability => "availability",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::BookAppointment => write!(f, "BookAppointment"),
            ActionType::GetAvailability => write!(f, "GetAvailability"),
        }
    }
}
