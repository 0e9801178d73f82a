//! Parsing of single ledger export rows
//!
//! Column layout of the semicolon-separated export:
//!
//! | # | column | # | column |
//! |---|--------|---|--------|
//! | 0 | document date | 7 | credit account |
//! | 1 | date of entry | 8 | tax code |
//! | 2 | document number range | 9 | cost unit 1 |
//! | 3 | document number | 10 | cost unit 2 |
//! | 4 | posting text | 11 | posted amount (EUR) |
//! | 5 | posted amount | 12 | currency |
//! | 6 | debit account | | |

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::Regex;

use crate::tags::date;
use crate::types::*;

/// Number of columns in a ledger export row
pub const LEDGER_COLUMNS: usize = 13;

/// Alphabetic range prefix followed by the numeric document number
pub const DOCUMENT_NUMBER_PATTERN: &str = r"^([A-Za-z]*)([0-9]+)$";

const DATE_SEPARATOR: char = '.';

/// Parser for rows of the ledger export, in German number and date notation
#[derive(Debug, Clone)]
pub struct LedgerRecordParser {
    document_number: Regex,
}

impl Default for LedgerRecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerRecordParser {
    pub fn new() -> Self {
        Self {
            document_number: Regex::new(DOCUMENT_NUMBER_PATTERN)
                .expect("hardcoded regex should be valid"),
        }
    }

    /// Parse one row into a ledger entry.
    ///
    /// When the four identity columns are all blank the row continues a
    /// statement: dates stay unset and the number columns empty, the rest of
    /// the row is parsed as usual.
    pub fn parse_row<S: AsRef<str>>(&self, fields: &[S]) -> DocResult<LedgerEntry> {
        if fields.len() != LEDGER_COLUMNS {
            return Err(DocError::ColumnCount {
                expected: LEDGER_COLUMNS,
                found: fields.len(),
            });
        }
        let fields: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();

        let continuation = fields[..4].iter().all(|f| f.is_empty());
        let (document_date, entry_date) = if continuation {
            (None, None)
        } else {
            (
                Some(parse_date("document date", fields[0])?),
                Some(parse_date("date of entry", fields[1])?),
            )
        };

        Ok(LedgerEntry {
            document_date,
            entry_date,
            document_number_range: fields[2].to_string(),
            document_number: fields[3].to_string(),
            posting_text: fields[4].to_string(),
            amount: parse_amount("posted amount", fields[5])?,
            debit_account: parse_account("debit account", fields[6])?,
            credit_account: parse_account("credit account", fields[7])?,
            tax_code: parse_account("tax code", fields[8])?,
            cost_unit_1: fields[9].to_string(),
            cost_unit_2: fields[10].to_string(),
            amount_eur: parse_amount("posted amount EUR", fields[11])?,
            currency: fields[12].to_string(),
        })
    }

    /// Split `BB123` into `("BB", "123")`. The whole string must be an
    /// optional run of letters followed by at least one digit.
    pub fn split_document_number(&self, raw: &str) -> DocResult<(String, String)> {
        let captures = self
            .document_number
            .captures(raw)
            .ok_or_else(|| DocError::InvalidDocNumber(raw.to_string()))?;

        let range = captures.get(1).map_or("", |m| m.as_str());
        let number = captures.get(2).map_or("", |m| m.as_str());
        Ok((range.to_string(), number.to_string()))
    }
}

fn field_error(field: &'static str, source: DocError) -> DocError {
    DocError::InvalidField {
        field,
        source: Box::new(source),
    }
}

fn parse_date(field: &'static str, raw: &str) -> DocResult<NaiveDate> {
    date::parse_delimited(raw, DATE_SEPARATOR).map_err(|e| field_error(field, e))
}

/// `1.234,56` -> `1234.56`
fn parse_amount(field: &'static str, raw: &str) -> DocResult<BigDecimal> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    BigDecimal::from_str(&normalized)
        .map_err(|_| field_error(field, DocError::MalformedNumber(raw.to_string())))
}

/// Blank parses to -1 so that account 0 stays distinguishable
fn parse_account(field: &'static str, raw: &str) -> DocResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(-1);
    }
    raw.parse::<i64>()
        .map_err(|_| field_error(field, DocError::MalformedNumber(raw.to_string())))
}
