//! Reconciliation of ledger entries against scanned documents
//!
//! Two passes run over a working set of the entries:
//!
//! 1. **Document number**: an entry whose document number appears as the
//!    invoice number tag of exactly one file is paired with that file. Two or
//!    more such files abort the run with `DuplicateDocumentNumber`.
//! 2. **Statement**: each entry still open is paired with the first file that
//!    has a statement period covering the document date and an account tag
//!    naming the entry's debit or credit account.
//!
//! A matched entry is consumed and takes no part in later passes. The caller's
//! entries and files are never modified.

use crate::config::TagVocabulary;
use crate::query::TagQueryEngine;
use crate::types::*;

/// Outcome of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationReport {
    /// Document-number matches first, then statement matches, each in entry order
    pub matches: Vec<MatchResult>,
    /// Entries left without a document; only filled when requested
    pub unmatched: Vec<LedgerEntry>,
}

impl ReconciliationReport {
    pub fn document_matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.matches_of(MatchKind::DocumentNumber)
    }

    pub fn statement_matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.matches_of(MatchKind::Statement)
    }

    fn matches_of(&self, kind: MatchKind) -> impl Iterator<Item = &MatchResult> {
        self.matches.iter().filter(move |m| m.kind == kind)
    }
}

struct WorkingEntry<'a> {
    entry: &'a LedgerEntry,
    consumed: bool,
}

impl WorkingEntry<'_> {
    fn is_open(&self) -> bool {
        !self.consumed && !self.entry.is_empty()
    }
}

/// Pairs ledger entries with the file records that evidence them
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    query: TagQueryEngine,
}

impl ReconciliationEngine {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        Self {
            query: TagQueryEngine::new(vocabulary),
        }
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        self.query.vocabulary()
    }

    /// Run both passes.
    ///
    /// Statement matches take the first candidate in `records` order, so pass
    /// the records in a stable order when results must be reproducible.
    pub fn reconcile(
        &self,
        entries: &[LedgerEntry],
        records: &[FileRecord],
        report_unmatched: bool,
    ) -> DocResult<ReconciliationReport> {
        let mut working: Vec<WorkingEntry<'_>> = entries
            .iter()
            .map(|entry| WorkingEntry {
                entry,
                consumed: false,
            })
            .collect();

        let mut report = ReconciliationReport::default();
        self.match_document_numbers(&mut working, records, &mut report.matches)?;
        self.match_statements(&mut working, records, &mut report.matches);

        let open: Vec<&LedgerEntry> = working
            .iter()
            .filter(|w| w.is_open())
            .map(|w| w.entry)
            .collect();

        if report_unmatched {
            for entry in &open {
                tracing::warn!(
                    document_number = %entry.full_document_number(),
                    posting_text = %entry.posting_text,
                    amount = %entry.amount,
                    "no document found for ledger entry"
                );
            }
            report.unmatched = open.iter().map(|entry| (*entry).clone()).collect();
        }

        tracing::info!(
            entries = entries.len(),
            files = records.len(),
            document_matches = report.document_matches().count(),
            statement_matches = report.statement_matches().count(),
            unmatched = open.len(),
            "reconciliation finished"
        );

        Ok(report)
    }

    fn match_document_numbers(
        &self,
        working: &mut [WorkingEntry<'_>],
        records: &[FileRecord],
        matches: &mut Vec<MatchResult>,
    ) -> DocResult<()> {
        let invoice_tag = &self.vocabulary().invoice_number;

        for item in working.iter_mut().filter(|w| w.is_open()) {
            let document_number = item.entry.full_document_number();
            if document_number.is_empty() {
                continue;
            }

            let query = FileRecord::with_tags(
                "",
                [Tag::Value(ValueTag::new(invoice_tag, &document_number))],
            );

            match self.query.find_by_query(records, &query).as_slice() {
                [] => {}
                [file] => {
                    tracing::debug!(
                        document_number = %document_number,
                        filename = %file.filename,
                        "matched ledger entry by document number"
                    );
                    matches.push(MatchResult::new(
                        item.entry.clone(),
                        (*file).clone(),
                        MatchKind::DocumentNumber,
                    ));
                    item.consumed = true;
                }
                files => {
                    let filenames: Vec<String> =
                        files.iter().map(|file| file.filename.clone()).collect();
                    tracing::warn!(
                        document_number = %document_number,
                        files = ?filenames,
                        "document number tagged on several files"
                    );
                    return Err(DocError::DuplicateDocumentNumber {
                        document_number,
                        filenames,
                    });
                }
            }
        }

        Ok(())
    }

    fn match_statements(
        &self,
        working: &mut [WorkingEntry<'_>],
        records: &[FileRecord],
        matches: &mut Vec<MatchResult>,
    ) {
        for item in working.iter_mut().filter(|w| w.is_open()) {
            // continuation rows carry no date to place inside a statement period
            let Some(date) = item.entry.document_date else {
                continue;
            };

            let candidates = self.query.find_by_statement_criteria(
                records,
                date,
                item.entry.debit_account,
                item.entry.credit_account,
            );

            if let Some(file) = candidates.first() {
                tracing::debug!(
                    date = %date,
                    filename = %file.filename,
                    candidates = candidates.len(),
                    "matched ledger entry by statement"
                );
                matches.push(MatchResult::new(
                    item.entry.clone(),
                    (*file).clone(),
                    MatchKind::Statement,
                ));
                item.consumed = true;
            }
        }
    }
}
