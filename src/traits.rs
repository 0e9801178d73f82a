//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for annotated files
///
/// This trait allows the document archive to work with any storage backend
/// (PostgreSQL, SQLite, a document store, in-memory, etc.) by implementing
/// these methods. The archive never issues queries of its own; it filters
/// the collections handed back here.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Insert a record, or replace the record with the same filename
    async fn save_file_record(&mut self, record: &FileRecord) -> DocResult<()>;

    /// Get a record by filename
    async fn get_file_record(&self, filename: &str) -> DocResult<Option<FileRecord>>;

    /// List all records in a stable order.
    ///
    /// Statement matching picks the first candidate, so this order decides
    /// ties between statements.
    async fn list_file_records(&self) -> DocResult<Vec<FileRecord>>;

    /// Delete a record by filename
    async fn delete_file_record(&mut self, filename: &str) -> DocResult<()>;
}

/// Trait for implementing custom file record validation rules
pub trait FileRecordValidator: Send + Sync {
    /// Validate a record before saving
    fn validate_file_record(&self, record: &FileRecord) -> DocResult<()>;
}

/// Default validator: a record needs a filename
pub struct DefaultFileRecordValidator;

impl FileRecordValidator for DefaultFileRecordValidator {
    fn validate_file_record(&self, record: &FileRecord) -> DocResult<()> {
        if record.filename.trim().is_empty() {
            return Err(DocError::Validation(
                "Filename cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
