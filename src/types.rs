//! Core types and data structures for the document reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bare label attached to a file, e.g. `paid`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleTag {
    pub tag: String,
}

impl SimpleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// A key/value annotation, e.g. `invoice:RE4711`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueTag {
    pub tag: String,
    pub value: String,
}

impl ValueTag {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// A key with a date interval, e.g. `statement:01042014..30042014`
///
/// A `None` bound is the zero date and leaves the interval open on that side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeTag {
    pub tag: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RangeTag {
    /// Create a range tag; at least one bound must be set
    pub fn new(
        tag: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DocResult<Self> {
        let tag = tag.into();
        if start.is_none() && end.is_none() {
            return Err(DocError::InvalidRange(tag));
        }
        Ok(Self { tag, start, end })
    }

    /// Whether `date` lies inside the interval, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.start == Some(date) || self.end == Some(date) {
            return true;
        }
        let after_start = self.start.is_none_or(|start| start < date);
        let before_end = self.end.is_none_or(|end| end > date);
        after_start && before_end
    }

    /// Start is not after end. Open intervals are always ordered.
    pub fn is_ordered(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

/// The three shapes an annotation can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    Simple,
    Value,
    Range,
}

/// A parsed annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Simple(SimpleTag),
    Value(ValueTag),
    Range(RangeTag),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Simple(_) => TagKind::Simple,
            Tag::Value(_) => TagKind::Value,
            Tag::Range(_) => TagKind::Range,
        }
    }

    /// The key part of the annotation
    pub fn key(&self) -> &str {
        match self {
            Tag::Simple(t) => &t.tag,
            Tag::Value(t) => &t.tag,
            Tag::Range(t) => &t.tag,
        }
    }
}

/// One scanned file and its annotations
///
/// Each collection behaves like a set: exact duplicates are dropped on insert,
/// insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Name of the file in the archive
    pub filename: String,
    /// Bare labels
    pub simple_tags: Vec<SimpleTag>,
    /// Key/value annotations
    pub value_tags: Vec<ValueTag>,
    /// Date interval annotations
    pub range_tags: Vec<RangeTag>,
}

impl FileRecord {
    /// Create an untagged record
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Create a record carrying the given tags
    pub fn with_tags(filename: impl Into<String>, tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut record = Self::new(filename);
        record.append(tags);
        record
    }

    /// Add a tag unless an identical one is already present.
    /// Returns whether the tag was inserted.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        match tag {
            Tag::Simple(t) => push_unique(&mut self.simple_tags, t),
            Tag::Value(t) => push_unique(&mut self.value_tags, t),
            Tag::Range(t) => push_unique(&mut self.range_tags, t),
        }
    }

    /// Union the given tags into this record, returning how many were new
    pub fn append(&mut self, tags: impl IntoIterator<Item = Tag>) -> usize {
        tags.into_iter()
            .map(|tag| self.add_tag(tag))
            .filter(|added| *added)
            .count()
    }

    /// All tags in display order: simple, value, range
    pub fn tags(&self) -> Vec<Tag> {
        self.simple_tags
            .iter()
            .cloned()
            .map(Tag::Simple)
            .chain(self.value_tags.iter().cloned().map(Tag::Value))
            .chain(self.range_tags.iter().cloned().map(Tag::Range))
            .collect()
    }

    pub fn tag_count(&self) -> usize {
        self.simple_tags.len() + self.value_tags.len() + self.range_tags.len()
    }

    pub fn is_untagged(&self) -> bool {
        self.tag_count() == 0
    }

    /// Whether any tag, of any kind, uses `key`
    pub fn has_tag_key(&self, key: &str) -> bool {
        self.simple_tags.iter().any(|t| t.tag == key)
            || self.value_tags.iter().any(|t| t.tag == key)
            || self.range_tags.iter().any(|t| t.tag == key)
    }

    /// Values of every value tag named `key`, in insertion order
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.value_tags
            .iter()
            .filter(move |t| t.tag == key)
            .map(|t| t.value.as_str())
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}

/// One booking row of a ledger export
///
/// Dates are `None` for statement continuation rows. Account and tax code
/// fields hold `-1` when the column was blank, so that account `0` stays
/// distinguishable from "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Date printed on the document
    pub document_date: Option<NaiveDate>,
    /// Date the booking was entered
    pub entry_date: Option<NaiveDate>,
    /// Alphabetic prefix of the document number
    pub document_number_range: String,
    /// Numeric part of the document number
    pub document_number: String,
    /// Free-text booking description
    pub posting_text: String,
    /// Amount in the posting currency
    pub amount: BigDecimal,
    pub debit_account: i64,
    pub credit_account: i64,
    pub tax_code: i64,
    pub cost_unit_1: String,
    pub cost_unit_2: String,
    /// Amount converted to euro
    pub amount_eur: BigDecimal,
    /// ISO currency code of `amount`
    pub currency: String,
}

impl LedgerEntry {
    /// Document number range and number joined, as written on invoices
    pub fn full_document_number(&self) -> String {
        format!("{}{}", self.document_number_range, self.document_number)
    }

    /// Whether the identity columns were blank in the export
    pub fn is_continuation(&self) -> bool {
        self.document_date.is_none()
            && self.entry_date.is_none()
            && self.document_number_range.is_empty()
            && self.document_number.is_empty()
    }

    /// Whether every field holds its zero value.
    ///
    /// A `-1` account or tax code counts as data here.
    pub fn is_empty(&self) -> bool {
        let zero = BigDecimal::from(0);
        self.is_continuation()
            && self.posting_text.is_empty()
            && self.amount == zero
            && self.debit_account == 0
            && self.credit_account == 0
            && self.tax_code == 0
            && self.cost_unit_1.is_empty()
            && self.cost_unit_2.is_empty()
            && self.amount_eur == zero
            && self.currency.is_empty()
    }
}

/// Which reconciliation pass produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// The invoice number tag equals the entry's document number
    DocumentNumber,
    /// A statement covering the document date for one of the entry's accounts
    Statement,
}

/// A ledger entry paired with the file that evidences it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: LedgerEntry,
    pub file: FileRecord,
    pub kind: MatchKind,
}

impl MatchResult {
    pub fn new(entry: LedgerEntry, file: FileRecord, kind: MatchKind) -> Self {
        Self { entry, file, kind }
    }
}

/// Errors that can occur while parsing annotations, ledger rows or reconciling
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("Tag '{0}' has a separator but no value")]
    MissingValue(String),
    #[error("Invalid range in tag '{0}'")]
    InvalidRange(String),
    #[error("Invalid month {month} in date '{input}'")]
    InvalidMonth { input: String, month: u32 },
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),
    #[error("Malformed number: '{0}'")]
    MalformedNumber(String),
    #[error("Invalid document number: '{0}'")]
    InvalidDocNumber(String),
    #[error(
        "Document number '{document_number}' is tagged on several files: {}",
        .filenames.join(", ")
    )]
    DuplicateDocumentNumber {
        document_number: String,
        filenames: Vec<String>,
    },
    #[error("Invalid {field}: {source}")]
    InvalidField {
        field: &'static str,
        source: Box<DocError>,
    },
    #[error("Expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Row {row}: {source}")]
    InvalidRow { row: usize, source: Box<DocError> },
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for document operations
pub type DocResult<T> = Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_tag_requires_a_bound() {
        assert_eq!(
            RangeTag::new("statement", None, None),
            Err(DocError::InvalidRange("statement".to_string()))
        );
        assert!(RangeTag::new("statement", Some(date(2014, 4, 1)), None).is_ok());
    }

    #[test]
    fn test_range_tag_contains() {
        let range =
            RangeTag::new("statement", Some(date(2014, 4, 1)), Some(date(2014, 4, 30))).unwrap();
        assert!(range.contains(date(2014, 4, 1)));
        assert!(range.contains(date(2014, 4, 15)));
        assert!(range.contains(date(2014, 4, 30)));
        assert!(!range.contains(date(2014, 3, 31)));
        assert!(!range.contains(date(2014, 5, 1)));

        let open_end = RangeTag::new("statement", Some(date(2014, 4, 1)), None).unwrap();
        assert!(open_end.contains(date(2030, 1, 1)));
        assert!(!open_end.contains(date(2014, 3, 1)));
    }

    #[test]
    fn test_file_record_deduplicates_tags() {
        let mut record = FileRecord::new("scan.pdf");
        assert!(record.add_tag(Tag::Simple(SimpleTag::new("paid"))));
        assert!(!record.add_tag(Tag::Simple(SimpleTag::new("paid"))));
        assert!(record.add_tag(Tag::Value(ValueTag::new("invoice", "1"))));
        assert!(record.add_tag(Tag::Value(ValueTag::new("invoice", "2"))));

        let added = record.append(vec![
            Tag::Value(ValueTag::new("invoice", "2")),
            Tag::Simple(SimpleTag::new("archived")),
        ]);
        assert_eq!(added, 1);
        assert_eq!(record.tag_count(), 4);
        assert_eq!(record.values_of("invoice").collect::<Vec<_>>(), vec!["1", "2"]);
        assert!(record.has_tag_key("archived"));
        assert!(!record.has_tag_key("statement"));
    }

    #[test]
    fn test_ledger_entry_emptiness() {
        let mut entry = LedgerEntry::default();
        assert!(entry.is_empty());
        assert!(entry.is_continuation());

        entry.debit_account = -1;
        assert!(!entry.is_empty());
        assert!(entry.is_continuation());
    }

    #[test]
    fn test_duplicate_error_message_names_files() {
        let err = DocError::DuplicateDocumentNumber {
            document_number: "B6".to_string(),
            filenames: vec!["a.pdf".to_string(), "b.pdf".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Document number 'B6' is tagged on several files: a.pdf, b.pdf"
        );
    }
}
