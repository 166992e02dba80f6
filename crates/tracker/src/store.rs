//! Persisted, id-keyed collection of expense records.
//!
//! A plain JSON file holding a map from record id to record. A missing
//! file is an empty store; every mutation rewrites the whole file.
//! Single logical writer assumed (the [`Tracker`]), atomicity per
//! operation only.
//!
//! [`Tracker`]: crate::Tracker

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use api_types::expense::ExpenseRecord;

use crate::error::StoreError;

const DEFAULT_STORE_PATH: &str = "config/expenses.json";

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    records: HashMap<String, ExpenseRecord>,
}

impl LocalStore {
    /// Opens the store file, treating a missing file as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, records })
    }

    /// Every stored record, in no particular order.
    pub fn records(&self) -> Vec<ExpenseRecord> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts or overwrites by id.
    pub fn put(&mut self, record: ExpenseRecord) -> Result<(), StoreError> {
        self.records.insert(record.id.clone(), record);
        self.save()
    }

    /// Removes a record if present; an absent id is a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if self.records.remove(id).is_none() {
            return Ok(());
        }
        self.save()
    }

    /// Removes every record. Used only during a full resync.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

pub fn default_store_path() -> &'static str {
    DEFAULT_STORE_PATH
}
