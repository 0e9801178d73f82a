//! Document archive orchestrator that ties storage, tagging and reconciliation together

use chrono::NaiveDate;

use crate::config::ReconciliationConfig;
use crate::ledger::LedgerImporter;
use crate::query::TagQueryEngine;
use crate::reconciliation::{ReconciliationEngine, ReconciliationReport};
use crate::tags::TagParser;
use crate::traits::*;
use crate::types::*;

/// Archive of annotated files backed by a storage implementation
pub struct DocumentArchive<S: DocumentStorage> {
    storage: S,
    parser: TagParser,
    query: TagQueryEngine,
    engine: ReconciliationEngine,
    importer: LedgerImporter,
    validator: Box<dyn FileRecordValidator>,
}

impl<S: DocumentStorage> DocumentArchive<S> {
    /// Create an archive with the default configuration
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, ReconciliationConfig::default())
    }

    /// Create an archive with custom separators and tag vocabulary
    pub fn with_config(storage: S, config: ReconciliationConfig) -> Self {
        Self::with_validator(storage, config, Box::new(DefaultFileRecordValidator))
    }

    /// Create an archive with a custom record validator
    pub fn with_validator(
        storage: S,
        config: ReconciliationConfig,
        validator: Box<dyn FileRecordValidator>,
    ) -> Self {
        Self {
            storage,
            parser: TagParser::new(config.syntax),
            query: TagQueryEngine::new(config.vocabulary.clone()),
            engine: ReconciliationEngine::new(config.vocabulary),
            importer: LedgerImporter::new(),
            validator,
        }
    }

    pub fn parser(&self) -> &TagParser {
        &self.parser
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Annotation operations
    /// Parse `raw_tags` and add them to the file's record, creating the
    /// record if the file has no annotations yet
    pub async fn annotate<T: AsRef<str>>(
        &mut self,
        filename: &str,
        raw_tags: &[T],
    ) -> DocResult<FileRecord> {
        let tags = self.parser.parse_all(raw_tags)?;

        let mut record = self
            .storage
            .get_file_record(filename)
            .await?
            .unwrap_or_else(|| FileRecord::new(filename));
        let added = record.append(tags);

        self.validator.validate_file_record(&record)?;
        self.storage.save_file_record(&record).await?;

        tracing::debug!(filename, added, total = record.tag_count(), "annotated file");
        Ok(record)
    }

    /// Get a record by filename
    pub async fn get(&self, filename: &str) -> DocResult<Option<FileRecord>> {
        self.storage.get_file_record(filename).await
    }

    /// Get a record by filename, returning an error if not found
    pub async fn get_required(&self, filename: &str) -> DocResult<FileRecord> {
        self.get(filename)
            .await?
            .ok_or_else(|| DocError::FileNotFound(filename.to_string()))
    }

    /// The file's tags rendered in annotation syntax
    pub async fn describe(&self, filename: &str) -> DocResult<Vec<String>> {
        let record = self.get_required(filename).await?;
        Ok(record
            .tags()
            .iter()
            .map(|tag| self.parser.format(tag))
            .collect())
    }

    /// Remove a file and all of its annotations
    pub async fn remove(&mut self, filename: &str) -> DocResult<()> {
        self.storage.delete_file_record(filename).await
    }

    // Query operations
    /// Records matching `query` exactly, see [`TagQueryEngine::find_by_query`]
    pub async fn find(&self, query: &FileRecord) -> DocResult<Vec<FileRecord>> {
        let records = self.storage.list_file_records().await?;
        Ok(self
            .query
            .find_by_query(&records, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Records carrying all of the given annotations, under any filename
    pub async fn find_tagged<T: AsRef<str>>(&self, raw_tags: &[T]) -> DocResult<Vec<FileRecord>> {
        let query = FileRecord::with_tags("", self.parser.parse_all(raw_tags)?);
        self.find(&query).await
    }

    /// Records whose invoice number tag equals `raw`, which must look like a
    /// document number (`BB123`, `987`)
    pub async fn find_by_document_number(&self, raw: &str) -> DocResult<Vec<FileRecord>> {
        let (range, number) = self.importer.parser().split_document_number(raw)?;
        let query = FileRecord::with_tags(
            "",
            [Tag::Value(ValueTag::new(
                &self.engine.vocabulary().invoice_number,
                format!("{range}{number}"),
            ))],
        );
        self.find(&query).await
    }

    /// Statements covering `date` for either account
    pub async fn find_for_statement(
        &self,
        date: NaiveDate,
        debit_account: i64,
        credit_account: i64,
    ) -> DocResult<Vec<FileRecord>> {
        let records = self.storage.list_file_records().await?;
        Ok(self
            .query
            .find_by_statement_criteria(&records, date, debit_account, credit_account)
            .into_iter()
            .cloned()
            .collect())
    }

    // Reconciliation operations
    /// Reconcile entries against every stored record, in storage order
    pub async fn reconcile(
        &self,
        entries: &[LedgerEntry],
        report_unmatched: bool,
    ) -> DocResult<ReconciliationReport> {
        let records = self.storage.list_file_records().await?;
        self.engine.reconcile(entries, &records, report_unmatched)
    }

    /// Import a ledger export and reconcile it
    pub async fn reconcile_csv(
        &self,
        text: &str,
        report_unmatched: bool,
    ) -> DocResult<ReconciliationReport> {
        let entries = self.importer.parse_str(text)?;
        self.reconcile(&entries, report_unmatched).await
    }
}
