//! Input item parsing shared by all operations

use block_core::domain::polling::{
    POLL_INTERVAL_RANGE, POLL_TIMEOUT_RANGE, PollConfig, secs_to_duration,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ops::RangeInclusive;

use crate::error::JobError;

/// One input item: connection, polling overrides and operation fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput<T> {
    #[serde(default)]
    pub connection_id: String,
    #[serde(default)]
    pub poll_interval: Option<f64>,
    #[serde(default)]
    pub poll_timeout: Option<f64>,
    #[serde(flatten)]
    pub fields: T,
}

impl<T: DeserializeOwned> ItemInput<T> {
    /// Parses and validates an input item
    pub fn parse(item: &Value) -> Result<Self, JobError> {
        if !item.is_object() {
            return Err(JobError::invalid_input("input item must be a JSON object"));
        }

        let input: Self = serde_json::from_value(item.clone())
            .map_err(|e| JobError::invalid_input(e.to_string()))?;

        if input.connection_id.trim().is_empty() {
            return Err(JobError::invalid_input("connectionId is required"));
        }

        Ok(input)
    }
}

impl<T> ItemInput<T> {
    /// Polling configuration for this item
    ///
    /// Absent or zero values fall back to `defaults`; anything else has to
    /// lie within the accepted range.
    pub fn poll_config(&self, defaults: &PollConfig) -> Result<PollConfig, JobError> {
        let interval = override_secs("pollInterval", self.poll_interval, &POLL_INTERVAL_RANGE)?;
        let timeout = override_secs("pollTimeout", self.poll_timeout, &POLL_TIMEOUT_RANGE)?;

        Ok(PollConfig {
            interval: interval.map(secs_to_duration).unwrap_or(defaults.interval),
            timeout: timeout.map(secs_to_duration).unwrap_or(defaults.timeout),
        })
    }
}

fn override_secs(
    field: &str,
    value: Option<f64>,
    range: &RangeInclusive<f64>,
) -> Result<Option<f64>, JobError> {
    match value {
        None => Ok(None),
        Some(v) if v == 0.0 => Ok(None),
        Some(v) if range.contains(&v) => Ok(Some(v)),
        Some(v) => Err(JobError::invalid_input(format!(
            "{} must be between {} and {} seconds, got {}",
            field,
            range.start(),
            range.end(),
            v
        ))),
    }
}

/// An integer field given either as a JSON number or as a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Number(f64),
    Text(String),
}

impl IntegerInput {
    /// Normalizes to a positive integer; zero and blank mean unset
    ///
    /// Strings are read from their leading digits, so `"45 min"` is 45.
    /// Fractions are truncated.
    pub fn normalize(&self, field: &str) -> Result<Option<i64>, JobError> {
        let value = match self {
            IntegerInput::Number(n) => {
                if !n.is_finite() {
                    return Err(JobError::invalid_input(format!(
                        "{} must be a finite number",
                        field
                    )));
                }
                let n = n.trunc();
                // `i64::MAX as f64` rounds up to 2^63, which is already out of range
                if n >= i64::MAX as f64 || n < i64::MIN as f64 {
                    return Err(JobError::invalid_input(format!(
                        "{} is out of range, got {}",
                        field, n
                    )));
                }
                n as i64
            }
            IntegerInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                parse_leading_integer(text).ok_or_else(|| {
                    JobError::invalid_input(format!("{} must be a number, got {:?}", field, text))
                })?
            }
        };

        match value {
            0 => Ok(None),
            v if v < 0 => Err(JobError::invalid_input(format!(
                "{} must be positive, got {}",
                field, v
            ))),
            v => Ok(Some(v)),
        }
    }
}

/// Normalizes an optional integer field
pub(crate) fn normalize_integer(
    field: &str,
    value: &Option<IntegerInput>,
) -> Result<Option<i64>, JobError> {
    match value {
        Some(value) => value.normalize(field),
        None => Ok(None),
    }
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'-' => (-1, &text[1..]),
        b'+' => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
