//! Block Core
//!
//! Core types shared by the Block booking client, runner and CLI.
//!
//! This crate contains:
//! - Domain types: remote jobs, action kinds and polling configuration
//! - DTOs: wire shapes for action submission, operation payloads and execution records

pub mod domain;
pub mod dto;
