//! Ordered in-memory record registry.
//!
//! # Responsibility
//! - Enforce key uniqueness for one record set.
//! - Keep insertion order so bulk saves are deterministic.
//!
//! # Invariants
//! - At most one record per key.
//! - `modify` keeps the record at its original position.
//! - Missing keys are reported through `bool`/`Option`, never by panicking.

use crate::model::record::Record;
use std::collections::HashMap;

/// Insertion-ordered mapping from record key to record.
#[derive(Debug, Clone)]
pub struct Registry<R: Record> {
    records: HashMap<String, R>,
    order: Vec<String>,
}

impl<R: Record> Default for Registry<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<R: Record> Registry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless its key is already present.
    pub fn add(&mut self, record: R) -> bool {
        if self.records.contains_key(record.key()) {
            return false;
        }
        let key = record.key().to_string();
        self.order.push(key.clone());
        self.records.insert(key, record);
        true
    }

    /// Replaces the record stored under `record.key()`.
    ///
    /// Returns `false` and inserts nothing when the key is absent.
    pub fn modify(&mut self, record: R) -> bool {
        match self.records.get_mut(record.key()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, key: &str) -> bool {
        if self.records.remove(key).is_none() {
            return false;
        }
        self.order.retain(|existing| existing != key);
        true
    }

    pub fn search(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Keeps only records for which `keep` returns `true`.
    ///
    /// Returns the number of removed records.
    pub fn retain(&mut self, mut keep: impl FnMut(&R) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| keep(&*record));
        let records = &self.records;
        self.order.retain(|key| records.contains_key(key));
        before - self.records.len()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.records.get(key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
