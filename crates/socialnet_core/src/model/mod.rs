//! Domain model for user profiles and status updates.
//!
//! # Responsibility
//! - Define the two record shapes stored by every backend.
//! - Own field validation shared by write paths and bulk loads.
//!
//! # Invariants
//! - Every record is identified by exactly one string key.
//! - A record that fails `validate()` never reaches storage.

pub mod record;
pub mod status;
pub mod user;
