//! CSV import/export for user and status record sets.
//!
//! # Responsibility
//! - Bulk load records from a header-first CSV source into a repository.
//! - Bulk save a repository's records to a CSV destination.
//!
//! # Invariants
//! - Header row is mandatory on read and always written on save.
//! - Duplicate keys are skipped during load; malformed rows abort it.
//! - A load never rolls back rows inserted before an abort.
//! - Save truncates the destination; a failed save may leave it partial.

mod loader;
mod saver;

use crate::model::record::{Record, ValidationError};
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use crate::repo::contract::RepoError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use loader::{load_statuses, load_users, LoadReport};
pub use saver::{save_statuses, save_users};

pub const USER_COLUMNS: &[&str] = &["user_id", "email", "name", "lastname"];
pub const STATUS_COLUMNS: &[&str] = &["status_id", "user_id", "status_text"];

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Record that maps one-to-one onto a CSV row.
///
/// Serialized field order must match `COLUMNS`.
pub trait TabularRecord: Record + Serialize + DeserializeOwned {
    const COLUMNS: &'static [&'static str];
    /// Record label used in log events.
    const KIND: &'static str;
}

impl TabularRecord for UserProfile {
    const COLUMNS: &'static [&'static str] = USER_COLUMNS;
    const KIND: &'static str = "user";
}

impl TabularRecord for StatusRecord {
    const COLUMNS: &'static [&'static str] = STATUS_COLUMNS;
    const KIND: &'static str = "status";
}

/// Bulk import/export failure.
#[derive(Debug)]
pub enum ExchangeError {
    /// Source or destination cannot be opened, created or flushed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// CSV stream is structurally broken (bad quoting, invalid UTF-8).
    Csv(csv::Error),
    /// Header row lacks a required column; no row was processed.
    MissingColumn(&'static str),
    /// Row at `line` is missing a field or fails validation.
    MalformedRow { line: u64, reason: String },
    /// Repository failed while applying or listing rows.
    Repo(RepoError),
}

impl ExchangeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_row(line: u64, err: &ValidationError) -> Self {
        Self::MalformedRow {
            line,
            reason: err.to_string(),
        }
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Csv(err) => write!(f, "csv error: {err}"),
            Self::MissingColumn(column) => write!(f, "header row is missing column `{column}`"),
            Self::MalformedRow { line, reason } => {
                write!(f, "malformed row at line {line}: {reason}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::MissingColumn(_) | Self::MalformedRow { .. } => None,
        }
    }
}

impl From<csv::Error> for ExchangeError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<RepoError> for ExchangeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
