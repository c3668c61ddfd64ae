//! SQLite-backed store for users and statuses.
//!
//! # Responsibility
//! - Provide the repository contracts over the `users` and `statuses`
//!   tables.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The wrapped connection is fully migrated (checked in `try_new`).
//! - Owning-user checks run before status writes so a missing user is a
//!   domain outcome, not a constraint error.
//! - `ON DELETE CASCADE` removes a user's statuses together with the user.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use crate::model::record::Record;
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use crate::repo::contract::{RepoError, RepoResult, StatusRepository, Store, UserRepository};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const BACKEND: &str = "sqlite";

const USER_SELECT_SQL: &str = "SELECT user_id, email, first_name, last_name FROM users";
const STATUS_SELECT_SQL: &str = "SELECT status_id, user_id, status_text FROM statuses";

/// Relational store owning one migrated connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps a connection that was opened through `db::open_db*`.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(&conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database and wraps it.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn user_exists(&self, user_id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = ?1);",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl UserRepository for SqliteStore {
    fn add_user(&mut self, user: &UserProfile) -> RepoResult<bool> {
        user.validate()?;
        let inserted = self.conn.execute(
            "INSERT INTO users (user_id, email, first_name, last_name)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO NOTHING;",
            params![user.user_id, user.email, user.first_name, user.last_name],
        )?;

        if inserted == 0 {
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
        let changed = self.conn.execute(
            "UPDATE users
             SET email = ?2, first_name = ?3, last_name = ?4
             WHERE user_id = ?1;",
            params![user.user_id, user.email, user.first_name, user.last_name],
        )?;

        if changed == 0 {
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
        let owned: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM statuses WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [user_id])?;

        if changed == 0 {
            error!(
                "event=user_delete module=repo status=error backend={BACKEND} user_id={user_id} reason=not_found"
            );
            return Ok(false);
        }
        info!(
            "event=user_delete module=repo status=ok backend={BACKEND} user_id={user_id} statuses_removed={owned}"
        );
        Ok(true)
    }

    fn search_user(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
        Ok(stmt.query_row([user_id], parse_user_row).optional()?)
    }

    fn list_users(&self) -> RepoResult<Vec<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{USER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}

impl StatusRepository for SqliteStore {
    fn add_status(&mut self, status: &StatusRecord) -> RepoResult<bool> {
        status.validate()?;
        if !self.user_exists(&status.user_id)? {
            error!(
                "event=status_add module=repo status=error backend={BACKEND} status_id={} user_id={} reason=unknown_user",
                status.status_id, status.user_id
            );
            return Ok(false);
        }

        let inserted = self.conn.execute(
            "INSERT INTO statuses (status_id, user_id, status_text)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(status_id) DO NOTHING;",
            params![status.status_id, status.user_id, status.status_text],
        )?;
        if inserted == 0 {
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
        if !self.user_exists(&status.user_id)? {
            error!(
                "event=status_modify module=repo status=error backend={BACKEND} status_id={} user_id={} reason=unknown_user",
                status.status_id, status.user_id
            );
            return Ok(false);
        }

        let changed = self.conn.execute(
            "UPDATE statuses
             SET user_id = ?2, status_text = ?3
             WHERE status_id = ?1;",
            params![status.status_id, status.user_id, status.status_text],
        )?;
        if changed == 0 {
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
        let changed = self
            .conn
            .execute("DELETE FROM statuses WHERE status_id = ?1;", [status_id])?;
        if changed == 0 {
            error!(
                "event=status_delete module=repo status=error backend={BACKEND} status_id={status_id} reason=not_found"
            );
            return Ok(false);
        }
        info!("event=status_delete module=repo status=ok backend={BACKEND} status_id={status_id}");
        Ok(true)
    }

    fn search_status(&self, status_id: &str) -> RepoResult<Option<StatusRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{STATUS_SELECT_SQL} WHERE status_id = ?1;"))?;
        Ok(stmt.query_row([status_id], parse_status_row).optional()?)
    }

    fn list_statuses(&self) -> RepoResult<Vec<StatusRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{STATUS_SELECT_SQL} ORDER BY id ASC;"))?;
        let statuses = stmt
            .query_map([], parse_status_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(statuses)
    }

    fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<StatusRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{STATUS_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"
        ))?;
        let statuses = stmt
            .query_map([user_id], parse_status_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(statuses)
    }
}

impl Store for SqliteStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        user_id: row.get("user_id")?,
        email: row.get("email")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}

fn parse_status_row(row: &Row<'_>) -> rusqlite::Result<StatusRecord> {
    Ok(StatusRecord {
        status_id: row.get("status_id")?,
        user_id: row.get("user_id")?,
        status_text: row.get("status_text")?,
    })
}
