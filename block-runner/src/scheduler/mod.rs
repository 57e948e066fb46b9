//! Scheduler layer
//!
//! Submits actions and waits for the resulting jobs to settle.

pub mod poller;

pub use poller::JobPoller;
