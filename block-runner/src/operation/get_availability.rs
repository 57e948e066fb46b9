//! Get availability operation

use block_core::domain::action::ActionType;
use block_core::dto::availability::{BusinessHours, GetAvailabilityPayload};
use serde::Deserialize;
use serde_json::Value;

use super::input::{IntegerInput, normalize_integer};
use super::{Operation, non_empty, require, to_payload};
use crate::error::JobError;

/// Lists open appointment slots within a date range
pub struct GetAvailability;

/// Fields of a get availability item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAvailabilityInput {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub duration: Option<IntegerInput>,
    #[serde(default)]
    pub business_hours: Option<BusinessHoursInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessHoursInput {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl Operation for GetAvailability {
    const ACTION: ActionType = ActionType::GetAvailability;
    type Input = GetAvailabilityInput;

    fn build_payload(input: &Self::Input) -> Result<Value, JobError> {
        let payload = GetAvailabilityPayload {
            start_date: require("startDate", &input.start_date)?,
            end_date: require("endDate", &input.end_date)?,
            provider: non_empty(&input.provider),
            duration: normalize_integer("duration", &input.duration)?,
            business_hours: input.business_hours.as_ref().and_then(|hours| {
                Some(BusinessHours {
                    start: non_empty(&hours.start)?,
                    end: non_empty(&hours.end),
                })
            }),
        };

        to_payload(&payload)
    }
}
