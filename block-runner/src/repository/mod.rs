//! Repository layer
//!
//! Repositories are stateless HTTP adapters over the Block API. The poller
//! only sees the trait, so the remote side can be scripted in tests.

mod jobs;

pub use jobs::{HttpJobRepository, JobRepository};
