//! Core use-case services.
//!
//! # Responsibility
//! - Expose menu-level operations by primitive arguments.
//! - Keep callers independent of the selected storage backend.

pub mod social_service;
