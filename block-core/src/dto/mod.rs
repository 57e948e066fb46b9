//! Data Transfer Objects
//!
//! Wire shapes exchanged with the scheduling service and handed back to the
//! host. Field names are camelCase on the wire; optional fields are omitted
//! rather than sent as `null`.

pub mod action;
pub mod availability;
pub mod booking;
pub mod execution;
