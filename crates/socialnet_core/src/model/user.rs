//! User profile model.
//!
//! # Invariants
//! - `user_id` is the unique key; at most one profile exists per id.
//! - Values are stored exactly as provided; validation never rewrites them.

use crate::model::record::{check_text, Record, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_USER_ID_CHARS: usize = 30;
pub const MAX_EMAIL_CHARS: usize = 255;
pub const MAX_FIRST_NAME_CHARS: usize = 30;
pub const MAX_LAST_NAME_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Profile of one registered user.
///
/// Serialized names follow the exchange file columns
/// (`user_id,email,name,lastname`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    #[serde(rename = "name")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

impl UserProfile {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Record for UserProfile {
    fn key(&self) -> &str {
        &self.user_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("user_id", &self.user_id, Some(MAX_USER_ID_CHARS))?;
        check_text("email", &self.email, Some(MAX_EMAIL_CHARS))?;
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        check_text("first_name", &self.first_name, Some(MAX_FIRST_NAME_CHARS))?;
        check_text("last_name", &self.last_name, Some(MAX_LAST_NAME_CHARS))?;
        Ok(())
    }
}
