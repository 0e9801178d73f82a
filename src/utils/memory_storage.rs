//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development.
///
/// Records are kept in insertion order; saving an existing filename replaces
/// the record in place.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    records: Arc<RwLock<Vec<FileRecord>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a storage instance pre-filled with records
    pub fn with_records(records: Vec<FileRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> DocResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> DocResult<RwLockReadGuard<'_, Vec<FileRecord>>> {
        self.records
            .read()
            .map_err(|_| DocError::Storage("record lock poisoned".to_string()))
    }

    fn write(&self) -> DocResult<RwLockWriteGuard<'_, Vec<FileRecord>>> {
        self.records
            .write()
            .map_err(|_| DocError::Storage("record lock poisoned".to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn save_file_record(&mut self, record: &FileRecord) -> DocResult<()> {
        let mut records = self.write()?;
        match records.iter_mut().find(|r| r.filename == record.filename) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn get_file_record(&self, filename: &str) -> DocResult<Option<FileRecord>> {
        Ok(self
            .read()?
            .iter()
            .find(|r| r.filename == filename)
            .cloned())
    }

    async fn list_file_records(&self) -> DocResult<Vec<FileRecord>> {
        Ok(self.read()?.clone())
    }

    async fn delete_file_record(&mut self, filename: &str) -> DocResult<()> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|r| r.filename != filename);
        if records.len() == before {
            return Err(DocError::FileNotFound(filename.to_string()));
        }
        Ok(())
    }
}
