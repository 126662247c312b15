//! Core library for the devboard job marketplace.
//!
//! The `marketplace` module owns the domain: job postings, the application
//! state machine, the authorization policy gating every mutation, and the
//! search/pagination engine. Storage and credential verification live
//! behind narrow traits so the whole lifecycle can be exercised in-memory.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
