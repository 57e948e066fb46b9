//! Book appointment operation

use block_core::domain::action::ActionType;
use block_core::dto::booking::{BookAppointmentPayload, Customer, ServiceAddress};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use super::input::{IntegerInput, normalize_integer};
use super::{Operation, non_empty, require, to_payload};
use crate::error::JobError;

/// Books an appointment for a customer on the merchant's booking system
pub struct BookAppointment;

/// Fields of a book appointment item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentInput {
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub service: String,
    pub customer: Option<CustomerInput>,
    #[serde(default)]
    pub duration: Option<IntegerInput>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub service_address: Option<ServiceAddressInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddressInput {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

impl Operation for BookAppointment {
    const ACTION: ActionType = ActionType::BookAppointment;
    type Input = BookAppointmentInput;

    fn build_payload(input: &Self::Input) -> Result<Value, JobError> {
        let datetime = require("datetime", &input.datetime)?;
        validate_datetime(&datetime)?;

        let customer = input
            .customer
            .as_ref()
            .ok_or_else(|| JobError::invalid_input("customer is required"))?;

        let payload = BookAppointmentPayload {
            datetime,
            provider: require("provider", &input.provider)?,
            service: require("service", &input.service)?,
            customer: Customer {
                first_name: require("customer.firstName", &customer.first_name)?,
                last_name: require("customer.lastName", &customer.last_name)?,
                phone: require("customer.phone", &customer.phone)?,
                email: non_empty(&customer.email),
            },
            duration: normalize_integer("duration", &input.duration)?,
            note: non_empty(&input.note),
            timezone: non_empty(&input.timezone),
            service_address: input.service_address.as_ref().and_then(service_address),
        };

        to_payload(&payload)
    }
}

/// Address is only sent when a street address was given
fn service_address(input: &ServiceAddressInput) -> Option<ServiceAddress> {
    Some(ServiceAddress {
        address: non_empty(&input.address)?,
        city: non_empty(&input.city),
        state: non_empty(&input.state),
        zip_code: non_empty(&input.zip_code),
        country: non_empty(&input.country),
        room: non_empty(&input.room),
    })
}

/// Accepts RFC 3339 timestamps and offset-less ISO 8601 local times
fn validate_datetime(value: &str) -> Result<(), JobError> {
    let valid = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok();

    if valid {
        Ok(())
    } else {
        Err(JobError::invalid_input(format!(
            "datetime must be an ISO 8601 date and time, got {:?}",
            value
        )))
    }
}
