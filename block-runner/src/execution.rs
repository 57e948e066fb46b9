//! Batch execution
//!
//! Runs one operation over a batch of input items. Items are processed one
//! after the other, in input order; each item's submit-and-poll sequence
//! finishes before the next begins. Every record is tagged with the index of
//! the item it came from.

use block_core::domain::polling::PollConfig;
use block_core::dto::action::ActionRequest;
use block_core::dto::execution::ExecutionRecord;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::error::{ExecutionError, JobError};
use crate::operation::{BookAppointment, GetAvailability, ItemInput, Operation, OperationKind};
use crate::repository::JobRepository;
use crate::scheduler::JobPoller;

/// Executes operations over batches of input items
#[derive(Clone)]
pub struct BatchExecutor {
    poller: JobPoller,
    defaults: PollConfig,
}

impl BatchExecutor {
    /// Creates a new executor
    ///
    /// # Arguments
    /// * `repository` - Access to the Block API
    /// * `defaults` - Polling used when an item does not override it
    pub fn new(repository: Arc<dyn JobRepository>, defaults: PollConfig) -> Self {
        Self {
            poller: JobPoller::new(repository),
            defaults,
        }
    }

    /// Runs the operation named by the host
    pub async fn execute_kind(
        &self,
        kind: OperationKind,
        items: &[Value],
        continue_on_fail: bool,
    ) -> Result<Vec<ExecutionRecord>, ExecutionError> {
        match kind {
            OperationKind::BookAppointment => {
                self.execute::<BookAppointment>(items, continue_on_fail)
                    .await
            }
            OperationKind::GetAvailability => {
                self.execute::<GetAvailability>(items, continue_on_fail)
                    .await
            }
        }
    }

    /// Runs `O` over every item
    ///
    /// With `continue_on_fail`, a failing item yields an `{ "error": ... }`
    /// record and the batch goes on. Without it, the first failure aborts
    /// the batch and the remaining items are not processed.
    pub async fn execute<O: Operation>(
        &self,
        items: &[Value],
        continue_on_fail: bool,
    ) -> Result<Vec<ExecutionRecord>, ExecutionError> {
        let execution_id = Uuid::new_v4();
        let span = info_span!("batch", %execution_id, action = %O::ACTION);

        async move {
            info!("Executing {} item(s)", items.len());

            let mut records = Vec::with_capacity(items.len());

            for (index, item) in items.iter().enumerate() {
                match self.execute_item::<O>(item).await {
                    Ok(payload) => {
                        debug!("Item {} completed", index);
                        records.push(ExecutionRecord::success(index, payload));
                    }
                    Err(e) if continue_on_fail => {
                        warn!("Item {} failed, continuing: {}", index, e);
                        records.push(ExecutionRecord::error(index, e.to_string()));
                    }
                    Err(e) => {
                        error!("Item {} failed, aborting batch: {}", index, e);
                        return Err(ExecutionError {
                            item_index: index,
                            source: e,
                        });
                    }
                }
            }

            info!("Batch finished with {} record(s)", records.len());
            Ok(records)
        }
        .instrument(span)
        .await
    }

    /// Parses one item, submits its action and waits for the job
    async fn execute_item<O: Operation>(&self, item: &Value) -> Result<Value, JobError> {
        let input: ItemInput<O::Input> = ItemInput::parse(item)?;
        let config = input.poll_config(&self.defaults)?;
        let payload = O::build_payload(&input.fields)?;

        let request = ActionRequest::new(O::ACTION, input.connection_id, payload);
        let job = self.poller.run(&request, &config).await?;

        Ok(job.into_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedRead, ScriptedRepository};
    use block_core::domain::action::ActionType;
    use serde_json::json;

    fn availability_item(connection: &str) -> Value {
        json!({
            "connectionId": connection,
            "startDate": "2025-03-01",
            "endDate": "2025-03-07",
            "pollInterval": 1,
            "pollTimeout": 10
        })
    }

    fn three_jobs_second_fails() -> ScriptedRepository {
        ScriptedRepository::new()
            .with_job(
                "job_a",
                vec![
                    ScriptedRead::status("queued"),
                    ScriptedRead::payload(json!({ "status": "success", "slots": ["09:00"] })),
                ],
            )
            .with_job(
                "job_b",
                vec![ScriptedRead::payload(json!({
                    "status": "error",
                    "errorCode": "provider_not_found",
                    "errorMessage": "No such provider"
                }))],
            )
            .with_job(
                "job_c",
                vec![ScriptedRead::payload(json!({ "status": "success", "slots": [] }))],
            )
    }

    fn executor(repo: &Arc<ScriptedRepository>) -> BatchExecutor {
        BatchExecutor::new(repo.clone(), PollConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_document_error_field_stays_a_success() {
        let repo = Arc::new(ScriptedRepository::new().with_job(
            "job_a",
            vec![ScriptedRead::payload(json!({
                "status": "success",
                "error": "reminder sms not sent",
                "slots": ["09:00"]
            }))],
        ));

        let records = executor(&repo)
            .execute::<GetAvailability>(&[availability_item("conn_a")], true)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert!(!records[0].is_error());
        assert_eq!(records[0].error_message(), None);
        assert_eq!(records[0].json["error"], "reminder sms not sent");
    }

    #[tokio::test(start_paused = true)]
    async fn test_continue_on_fail_keeps_order() {
        let repo = Arc::new(three_jobs_second_fails());
        let items = vec![
            availability_item("conn_a"),
            availability_item("conn_b"),
            availability_item("conn_c"),
        ];

        let records = executor(&repo)
            .execute::<GetAvailability>(&items, true)
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.paired_item.item, index);
        }
        assert_eq!(
            records[0].json,
            json!({ "status": "success", "slots": ["09:00"] })
        );
        assert_eq!(
            records[1].error_message(),
            Some(
                "Availability check job could not be completed. Job ID: job_b, \
                 Code: provider_not_found: No such provider"
            )
        );
        assert_eq!(records[2].json, json!({ "status": "success", "slots": [] }));

        let connections: Vec<_> = repo
            .submitted()
            .into_iter()
            .map(|req| req.connection_id)
            .collect();
        assert_eq!(connections, vec!["conn_a", "conn_b", "conn_c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_aborts_batch_by_default() {
        let repo = Arc::new(three_jobs_second_fails());
        let items = vec![
            availability_item("conn_a"),
            availability_item("conn_b"),
            availability_item("conn_c"),
        ];

        let err = executor(&repo)
            .execute::<GetAvailability>(&items, false)
            .await
            .unwrap_err();

        assert_eq!(err.item_index, 1);
        assert!(matches!(err.source, JobError::JobFailed { .. }));
        assert_eq!(repo.submitted().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_item_is_captured() {
        let repo = Arc::new(ScriptedRepository::new().with_job(
            "job_a",
            vec![ScriptedRead::status("success")],
        ));
        let items = vec![
            json!({ "startDate": "2025-03-01", "endDate": "2025-03-07" }),
            availability_item("conn_a"),
        ];

        let records = executor(&repo)
            .execute::<GetAvailability>(&items, true)
            .await
            .unwrap();

        assert_eq!(
            records[0].error_message(),
            Some("Invalid input: connectionId is required")
        );
        assert_eq!(records[1].json["status"], "success");
        assert_eq!(repo.submitted().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_job_id_record() {
        let repo = Arc::new(ScriptedRepository::new().with_missing_job_id());
        let items = vec![availability_item("conn_a")];

        let records = executor(&repo)
            .execute::<GetAvailability>(&items, true)
            .await
            .unwrap();

        assert_eq!(
            records[0].error_message(),
            Some("No job ID returned from the availability service")
        );
        assert_eq!(repo.read_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_kind_dispatches_action() {
        let repo = Arc::new(ScriptedRepository::new().with_job(
            "job_a",
            vec![ScriptedRead::payload(json!({ "status": "success", "appointmentId": "apt_1" }))],
        ));
        let items = vec![json!({
            "connectionId": "conn_a",
            "datetime": "2025-03-01T10:00:00Z",
            "provider": "Dr. Smith",
            "service": "Cleaning",
            "customer": { "firstName": "Ada", "lastName": "Lovelace", "phone": "+12065551212" },
            "duration": 30
        })];

        let records = executor(&repo)
            .execute_kind(OperationKind::BookAppointment, &items, false)
            .await
            .unwrap();

        assert_eq!(records[0].json["appointmentId"], "apt_1");
        let submitted = repo.submitted();
        assert_eq!(submitted[0].action, ActionType::BookAppointment);
        assert_eq!(submitted[0].payload["duration"], json!(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_item_poll_timeout_applies() {
        let repo = Arc::new(ScriptedRepository::new().with_job("job_a", vec![]));
        let items = vec![availability_item("conn_a")];

        let err = executor(&repo)
            .execute::<GetAvailability>(&items, false)
            .await
            .unwrap_err();

        match err.source {
            JobError::Timeout { job_id, timeout } => {
                assert_eq!(job_id, "job_a");
                assert_eq!(timeout, std::time::Duration::from_secs(10));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(repo.read_count(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch() {
        let repo = Arc::new(ScriptedRepository::new());
        let records = executor(&repo)
            .execute::<BookAppointment>(&[], false)
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
