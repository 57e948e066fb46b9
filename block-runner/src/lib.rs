//! Block Runner
//!
//! Executes Block booking operations for a batch of input items.
//!
//! Architecture:
//! - Configuration: credentials, transport timeout and polling defaults
//! - Repository: HTTP communication with the Block API (actions, jobs)
//! - Operations: per-operation input validation and payload construction
//! - Scheduler: the job poller that waits for a submitted job to settle
//! - Execution: sequential batch processing with continue-on-fail handling
//!
//! Each item submits one action, then polls the resulting job until it
//! succeeds, fails, or runs out of time.

pub mod config;
pub mod error;
pub mod execution;
pub mod operation;
pub mod repository;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RunnerConfig;
pub use error::{ExecutionError, JobError};
pub use execution::BatchExecutor;
pub use operation::{BookAppointment, GetAvailability, Operation, OperationKind};
pub use repository::{HttpJobRepository, JobRepository};
pub use scheduler::JobPoller;
