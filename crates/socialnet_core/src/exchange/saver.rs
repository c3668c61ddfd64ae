//! CSV saver.

use super::{ExchangeError, ExchangeResult, TabularRecord};
use crate::repo::contract::{StatusRepository, UserRepository};
use csv::WriterBuilder;
use log::{error, info};
use std::fs::File;
use std::path::Path;

/// Writes every user in listing order, replacing `path`.
///
/// Returns the number of data rows written.
pub fn save_users<R>(path: impl AsRef<Path>, repo: &R) -> ExchangeResult<usize>
where
    R: UserRepository + ?Sized,
{
    let users = repo.list_users()?;
    save_rows(path.as_ref(), &users)
}

/// Writes every status in listing order, replacing `path`.
pub fn save_statuses<R>(path: impl AsRef<Path>, repo: &R) -> ExchangeResult<usize>
where
    R: StatusRepository + ?Sized,
{
    let statuses = repo.list_statuses()?;
    save_rows(path.as_ref(), &statuses)
}

fn save_rows<T: TabularRecord>(path: &Path, records: &[T]) -> ExchangeResult<usize> {
    let result = write_rows(path, records);
    match &result {
        Ok(written) => info!(
            "event=bulk_save module=exchange status=ok kind={} rows={written} path={}",
            T::KIND,
            path.display()
        ),
        Err(err) => error!(
            "event=bulk_save module=exchange status=error kind={} path={} error={err}",
            T::KIND,
            path.display()
        ),
    }
    result
}

fn write_rows<T: TabularRecord>(path: &Path, records: &[T]) -> ExchangeResult<usize> {
    let file = File::create(path).map_err(|err| ExchangeError::io(path, err))?;
    // Header is written by hand so an empty record set still gets one.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(T::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|err| ExchangeError::io(path, err))?;
    Ok(records.len())
}
