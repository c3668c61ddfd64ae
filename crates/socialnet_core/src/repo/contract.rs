//! Repository contracts shared by every storage backend.
//!
//! # Responsibility
//! - Define user/status CRUD capabilities independent of storage.
//! - Separate domain-rule outcomes (`Ok(false)`, `Ok(None)`) from real
//!   failures (`Err`).
//!
//! # Invariants
//! - Duplicate key on add, missing key on modify/delete and unknown owning
//!   user are reported as `Ok(false)`.
//! - Validation and storage failures are reported as `Err(RepoError)`.
//! - Listing order is insertion order.

use crate::db::DbError;
use crate::model::record::ValidationError;
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for validation and persistence failures.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract for user profiles.
pub trait UserRepository {
    /// Inserts a profile; `Ok(false)` when the id is taken.
    fn add_user(&mut self, user: &UserProfile) -> RepoResult<bool>;
    /// Overwrites a profile; `Ok(false)` when the id is unknown.
    fn modify_user(&mut self, user: &UserProfile) -> RepoResult<bool>;
    /// Removes a profile and every status it owns; `Ok(false)` when unknown.
    fn delete_user(&mut self, user_id: &str) -> RepoResult<bool>;
    fn search_user(&self, user_id: &str) -> RepoResult<Option<UserProfile>>;
    fn list_users(&self) -> RepoResult<Vec<UserProfile>>;
}

/// CRUD contract for status updates.
pub trait StatusRepository {
    /// Inserts a status; `Ok(false)` when the id is taken or the owning user
    /// does not exist.
    fn add_status(&mut self, status: &StatusRecord) -> RepoResult<bool>;
    /// Overwrites owner and text; `Ok(false)` when the id is unknown or the
    /// new owning user does not exist.
    fn modify_status(&mut self, status: &StatusRecord) -> RepoResult<bool>;
    fn delete_status(&mut self, status_id: &str) -> RepoResult<bool>;
    fn search_status(&self, status_id: &str) -> RepoResult<Option<StatusRecord>>;
    fn list_statuses(&self) -> RepoResult<Vec<StatusRecord>>;
    fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<StatusRecord>>;
}

/// Full storage capability used by the service layer.
pub trait Store: UserRepository + StatusRepository {
    /// Short backend label used in log events.
    fn backend_name(&self) -> &'static str;
}
