//! Status update model.
//!
//! # Invariants
//! - `status_id` is the unique key.
//! - `user_id` must name an existing profile when the record is written
//!   through a store.

use crate::model::record::{check_text, Record, ValidationError};
use serde::{Deserialize, Serialize};

pub const MAX_STATUS_ID_CHARS: usize = 30;

/// Short free-text message owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status_id: String,
    pub user_id: String,
    pub status_text: String,
}

impl StatusRecord {
    pub fn new(
        status_id: impl Into<String>,
        user_id: impl Into<String>,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            status_id: status_id.into(),
            user_id: user_id.into(),
            status_text: status_text.into(),
        }
    }
}

impl Record for StatusRecord {
    fn key(&self) -> &str {
        &self.status_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("status_id", &self.status_id, Some(MAX_STATUS_ID_CHARS))?;
        check_text("user_id", &self.user_id, None)?;
        check_text("status_text", &self.status_text, None)?;
        Ok(())
    }
}
