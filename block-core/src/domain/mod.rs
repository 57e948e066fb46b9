//! Core domain types
//!
//! These types describe the entities the remote scheduling service owns
//! (jobs) and the knobs this side controls (action kind, polling).

pub mod action;
pub mod job;
pub mod polling;
