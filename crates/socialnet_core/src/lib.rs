//! Core logic for the social network registry.
//! User profiles and status updates, stored in memory or in SQLite,
//! exchanged with CSV files.

pub mod db;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use exchange::{ExchangeError, ExchangeResult, LoadReport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Record, ValidationError};
pub use model::status::StatusRecord;
pub use model::user::UserProfile;
pub use repo::contract::{RepoError, RepoResult, StatusRepository, Store, UserRepository};
pub use repo::memory::MemoryStore;
pub use repo::registry::Registry;
pub use repo::sqlite::SqliteStore;
pub use service::social_service::SocialService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
