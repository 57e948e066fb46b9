//! Execution records handed back to the host

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Output of one input item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Terminal job document on success, `{ "error": <message> }` on a captured failure
    pub json: Value,
    pub paired_item: PairedItem,
    /// Set only by [`ExecutionRecord::error`]; a job document may carry its own `error` field
    #[serde(skip)]
    failed: bool,
}

/// Index of the input item a record originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

impl ExecutionRecord {
    pub fn success(item: usize, json: Value) -> Self {
        Self {
            json,
            paired_item: PairedItem { item },
            failed: false,
        }
    }

    pub fn error(item: usize, message: impl Into<String>) -> Self {
        Self {
            json: json!({ "error": message.into() }),
            paired_item: PairedItem { item },
            failed: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.failed
    }

    /// Error message of a captured failure, if this record is one
    pub fn error_message(&self) -> Option<&str> {
        if !self.failed {
            return None;
        }
        self.json.get("error").and_then(Value::as_str)
    }
}
