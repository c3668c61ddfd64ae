//! In-memory store backed by two ordered registries.
//!
//! # Invariants
//! - A status is only accepted when its owner exists in the user registry.
//! - Deleting a user cascades to that user's statuses.
//! - Nothing is persisted; the store lives as long as its owner.

use crate::model::record::Record;
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use crate::repo::contract::{RepoResult, StatusRepository, Store, UserRepository};
use crate::repo::registry::Registry;
use log::{error, info};

const BACKEND: &str = "memory";

/// Process-local store for users and statuses.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Registry<UserProfile>,
    statuses: Registry<StatusRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &Registry<UserProfile> {
        &self.users
    }

    pub fn statuses(&self) -> &Registry<StatusRecord> {
        &self.statuses
    }
}

impl UserRepository for MemoryStore {
    fn add_user(&mut self, user: &UserProfile) -> RepoResult<bool> {
        user.validate()?;
        if !self.users.add(user.clone()) {
            error!(
                "event=user_add module=repo status=error backend={BACKEND} user_id={} reason=duplicate_id",
                user.user_id
            );
            return Ok(false);
        }
        info!(
            "event=user_add module=repo status=ok backend={BACKEND} user_id={}",
            user.user_id
        );
        Ok(true)
    }

    fn modify_user(&mut self, user: &UserProfile) -> RepoResult<bool> {
        user.validate()?;
        if !self.users.modify(user.clone()) {
            error!(
                "event=user_modify module=repo status=error backend={BACKEND} user_id={} reason=not_found",
                user.user_id
            );
            return Ok(false);
        }
        info!(
            "event=user_modify module=repo status=ok backend={BACKEND} user_id={}",
            user.user_id
        );
        Ok(true)
    }

    fn delete_user(&mut self, user_id: &str) -> RepoResult<bool> {
        if !self.users.delete(user_id) {
            error!(
                "event=user_delete module=repo status=error backend={BACKEND} user_id={user_id} reason=not_found"
            );
            return Ok(false);
        }
        let cascaded = self.statuses.retain(|status| status.user_id != user_id);
        info!(
            "event=user_delete module=repo status=ok backend={BACKEND} user_id={user_id} statuses_removed={cascaded}"
        );
        Ok(true)
    }

    fn search_user(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        Ok(self.users.search(user_id).cloned())
    }

    fn list_users(&self) -> RepoResult<Vec<UserProfile>> {
        Ok(self.users.iter().cloned().collect())
    }
}

impl StatusRepository for MemoryStore {
    fn add_status(&mut self, status: &StatusRecord) -> RepoResult<bool> {
        status.validate()?;
        if !self.users.contains_key(&status.user_id) {
            error!(
                "event=status_add module=repo status=error backend={BACKEND} status_id={} user_id={} reason=unknown_user",
                status.status_id, status.user_id
            );
            return Ok(false);
        }
        if !self.statuses.add(status.clone()) {
            error!(
                "event=status_add module=repo status=error backend={BACKEND} status_id={} reason=duplicate_id",
                status.status_id
            );
            return Ok(false);
        }
        info!(
            "event=status_add module=repo status=ok backend={BACKEND} status_id={}",
            status.status_id
        );
        Ok(true)
    }

    fn modify_status(&mut self, status: &StatusRecord) -> RepoResult<bool> {
        status.validate()?;
        if !self.users.contains_key(&status.user_id) {
            error!(
                "event=status_modify module=repo status=error backend={BACKEND} status_id={} user_id={} reason=unknown_user",
                status.status_id, status.user_id
            );
            return Ok(false);
        }
        if !self.statuses.modify(status.clone()) {
            error!(
                "event=status_modify module=repo status=error backend={BACKEND} status_id={} reason=not_found",
                status.status_id
            );
            return Ok(false);
        }
        info!(
            "event=status_modify module=repo status=ok backend={BACKEND} status_id={}",
            status.status_id
        );
        Ok(true)
    }

    fn delete_status(&mut self, status_id: &str) -> RepoResult<bool> {
        if !self.statuses.delete(status_id) {
            error!(
                "event=status_delete module=repo status=error backend={BACKEND} status_id={status_id} reason=not_found"
            );
            return Ok(false);
        }
        info!("event=status_delete module=repo status=ok backend={BACKEND} status_id={status_id}");
        Ok(true)
    }

    fn search_status(&self, status_id: &str) -> RepoResult<Option<StatusRecord>> {
        Ok(self.statuses.search(status_id).cloned())
    }

    fn list_statuses(&self) -> RepoResult<Vec<StatusRecord>> {
        Ok(self.statuses.iter().cloned().collect())
    }

    fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<StatusRecord>> {
        Ok(self
            .statuses
            .iter()
            .filter(|status| status.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
