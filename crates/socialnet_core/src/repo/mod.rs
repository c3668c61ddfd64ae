//! Repository layer abstractions and storage backends.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Provide interchangeable in-memory and SQLite implementations.
//!
//! # Invariants
//! - Write paths validate records before mutating storage.
//! - Both backends apply the same duplicate, missing-key and
//!   owning-user rules.

pub mod contract;
pub mod memory;
pub mod registry;
pub mod sqlite;
