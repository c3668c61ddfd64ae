//! Streaming CSV loader.

use super::{ExchangeError, ExchangeResult, TabularRecord};
use crate::model::status::StatusRecord;
use crate::model::user::UserProfile;
use crate::repo::contract::{RepoError, RepoResult, StatusRepository, UserRepository};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, error, info};
use std::fs::File;
use std::path::Path;

/// Outcome of a completed bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows stored in the repository.
    pub inserted: usize,
    /// Rows the repository declined (duplicate key, unknown owner).
    pub skipped: usize,
}

/// Loads `user_id,email,name,lastname` rows into `repo`.
pub fn load_users<R>(path: impl AsRef<Path>, repo: &mut R) -> ExchangeResult<LoadReport>
where
    R: UserRepository + ?Sized,
{
    load_rows::<UserProfile>(path.as_ref(), |user| repo.add_user(user))
}

/// Loads `status_id,user_id,status_text` rows into `repo`.
///
/// Rows whose owner is not a known user are skipped like duplicates.
pub fn load_statuses<R>(path: impl AsRef<Path>, repo: &mut R) -> ExchangeResult<LoadReport>
where
    R: StatusRepository + ?Sized,
{
    load_rows::<StatusRecord>(path.as_ref(), |status| repo.add_status(status))
}

fn load_rows<T: TabularRecord>(
    path: &Path,
    mut insert: impl FnMut(&T) -> RepoResult<bool>,
) -> ExchangeResult<LoadReport> {
    info!(
        "event=bulk_load module=exchange status=start kind={} path={}",
        T::KIND,
        path.display()
    );

    let result = File::open(path)
        .map_err(|err| ExchangeError::io(path, err))
        .and_then(|file| {
            let mut reader = ReaderBuilder::new()
                .flexible(true)
                .trim(Trim::Headers)
                .from_reader(file);
            let headers = reader.headers()?.clone();
            check_header::<T>(&headers)?;

            let mut report = LoadReport::default();
            for row in reader.records() {
                let row = row?;
                let line = row.position().map_or(0, |position| position.line());
                let record: T = row.deserialize(Some(&headers)).map_err(|err| {
                    ExchangeError::MalformedRow {
                        line,
                        reason: err.to_string(),
                    }
                })?;
                record
                    .validate()
                    .map_err(|err| ExchangeError::invalid_row(line, &err))?;

                match insert(&record) {
                    Ok(true) => report.inserted += 1,
                    Ok(false) => {
                        debug!(
                            "event=bulk_load module=exchange status=skip kind={} key={} line={line}",
                            T::KIND,
                            record.key()
                        );
                        report.skipped += 1;
                    }
                    Err(RepoError::Validation(err)) => {
                        return Err(ExchangeError::invalid_row(line, &err))
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Ok(report)
        });

    match &result {
        Ok(report) => info!(
            "event=bulk_load module=exchange status=ok kind={} inserted={} skipped={}",
            T::KIND,
            report.inserted,
            report.skipped
        ),
        Err(err) => error!(
            "event=bulk_load module=exchange status=error kind={} path={} error={err}",
            T::KIND,
            path.display()
        ),
    }
    result
}

fn check_header<T: TabularRecord>(headers: &StringRecord) -> ExchangeResult<()> {
    for column in T::COLUMNS {
        if !headers.iter().any(|name| name == *column) {
            return Err(ExchangeError::MissingColumn(*column));
        }
    }
    Ok(())
}
