//! Social network use-case service.
//!
//! # Responsibility
//! - Build domain records from primitive inputs and forward to the store.
//! - Route bulk CSV import/export through the exchange module.
//!
//! # Invariants
//! - The service never bypasses repository validation or key rules.
//! - The service is the sole owner of its store.

use crate::exchange::{self, ExchangeResult, LoadReport};
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use crate::repo::contract::{RepoResult, Store};
use std::path::Path;

/// Facade over one storage backend.
pub struct SocialService<S: Store> {
    store: S,
}

impl<S: Store> SocialService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Creates a user; `Ok(false)` when `user_id` is taken.
    pub fn add_user(
        &mut self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<bool> {
        self.store
            .add_user(&UserProfile::new(user_id, email, first_name, last_name))
    }

    /// Replaces all fields of an existing user; `Ok(false)` when unknown.
    pub fn update_user(
        &mut self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<bool> {
        self.store
            .modify_user(&UserProfile::new(user_id, email, first_name, last_name))
    }

    /// Deletes a user together with the statuses it owns.
    pub fn delete_user(&mut self, user_id: &str) -> RepoResult<bool> {
        self.store.delete_user(user_id)
    }

    pub fn search_user(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        self.store.search_user(user_id)
    }

    /// Creates a status; `Ok(false)` when `status_id` is taken or the owner
    /// does not exist.
    pub fn add_status(
        &mut self,
        status_id: &str,
        user_id: &str,
        status_text: &str,
    ) -> RepoResult<bool> {
        self.store
            .add_status(&StatusRecord::new(status_id, user_id, status_text))
    }

    pub fn update_status(
        &mut self,
        status_id: &str,
        user_id: &str,
        status_text: &str,
    ) -> RepoResult<bool> {
        self.store
            .modify_status(&StatusRecord::new(status_id, user_id, status_text))
    }

    pub fn delete_status(&mut self, status_id: &str) -> RepoResult<bool> {
        self.store.delete_status(status_id)
    }

    pub fn search_status(&self, status_id: &str) -> RepoResult<Option<StatusRecord>> {
        self.store.search_status(status_id)
    }

    pub fn statuses_of(&self, user_id: &str) -> RepoResult<Vec<StatusRecord>> {
        self.store.list_statuses_for_user(user_id)
    }

    pub fn load_users(&mut self, path: impl AsRef<Path>) -> ExchangeResult<LoadReport> {
        exchange::load_users(path, &mut self.store)
    }

    pub fn load_statuses(&mut self, path: impl AsRef<Path>) -> ExchangeResult<LoadReport> {
        exchange::load_statuses(path, &mut self.store)
    }

    pub fn save_users(&self, path: impl AsRef<Path>) -> ExchangeResult<usize> {
        exchange::save_users(path, &self.store)
    }

    pub fn save_statuses(&self, path: impl AsRef<Path>) -> ExchangeResult<usize> {
        exchange::save_statuses(path, &self.store)
    }
}
