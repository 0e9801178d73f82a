//! Ingestion of a whole ledger export

use std::io::Read;

use csv::ReaderBuilder;

use crate::ledger::record::LedgerRecordParser;
use crate::types::*;

/// Reads semicolon-separated ledger exports into entries.
///
/// The first row is a header and is discarded without validation. Rows whose
/// columns are all blank are skipped, as are rows that parse to an empty
/// entry. Any other bad row aborts the import.
#[derive(Debug, Clone, Default)]
pub struct LedgerImporter {
    parser: LedgerRecordParser,
}

impl LedgerImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer around an existing row parser
    pub fn with_parser(parser: LedgerRecordParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &LedgerRecordParser {
        &self.parser
    }

    /// Import from any reader
    pub fn read<R: Read>(&self, reader: R) -> DocResult<Vec<LedgerEntry>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (index, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| DocError::Csv(e.to_string()))?;
            let row = record
                .position()
                .map_or(index + 2, |position| position.line() as usize);

            if record.iter().all(|field| field.trim().is_empty()) {
                tracing::debug!(row, "skipping blank ledger row");
                skipped += 1;
                continue;
            }

            let fields: Vec<&str> = record.iter().collect();
            let entry = self
                .parser
                .parse_row(&fields)
                .map_err(|e| DocError::InvalidRow {
                    row,
                    source: Box::new(e),
                })?;

            if entry.is_empty() {
                tracing::debug!(row, "skipping empty ledger row");
                skipped += 1;
                continue;
            }

            entries.push(entry);
        }

        tracing::info!(entries = entries.len(), skipped, "imported ledger export");
        Ok(entries)
    }

    /// Import from an in-memory export
    pub fn parse_str(&self, text: &str) -> DocResult<Vec<LedgerEntry>> {
        self.read(text.as_bytes())
    }
}
