//! In-memory filtering of file records by their tags

use chrono::NaiveDate;

use crate::config::TagVocabulary;
use crate::types::*;

/// Query engine over a slice of file records.
///
/// Results borrow from the input and keep its order.
#[derive(Debug, Clone, Default)]
pub struct TagQueryEngine {
    vocabulary: TagVocabulary,
}

impl TagQueryEngine {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    /// Records matching every constraint of `query`.
    ///
    /// A non-empty query filename must match exactly. For each non-empty tag
    /// collection of the query, every query tag needs an identical tag in the
    /// same collection of the record; extra tags on the record are ignored.
    /// Range tags compare by value, not by interval overlap.
    pub fn find_by_query<'a>(
        &self,
        records: &'a [FileRecord],
        query: &FileRecord,
    ) -> Vec<&'a FileRecord> {
        records
            .iter()
            .filter(|record| Self::matches_query(record, query))
            .collect()
    }

    /// Whether a single record satisfies `query`
    pub fn matches_query(record: &FileRecord, query: &FileRecord) -> bool {
        if !query.filename.is_empty() && record.filename != query.filename {
            return false;
        }

        contains_all(&record.simple_tags, &query.simple_tags)
            && contains_all(&record.value_tags, &query.value_tags)
            && contains_all(&record.range_tags, &query.range_tags)
    }

    /// Records that look like the bank statement for a booking: a statement
    /// period covering `date` and an account number equal to the debit or
    /// credit account, both on the same record.
    pub fn find_by_statement_criteria<'a>(
        &self,
        records: &'a [FileRecord],
        date: NaiveDate,
        debit_account: i64,
        credit_account: i64,
    ) -> Vec<&'a FileRecord> {
        let debit = debit_account.to_string();
        let credit = credit_account.to_string();

        records
            .iter()
            .filter(|record| self.covers_date(record, date))
            .filter(|record| {
                record
                    .values_of(&self.vocabulary.account_number)
                    .any(|account| account == debit || account == credit)
            })
            .collect()
    }

    fn covers_date(&self, record: &FileRecord, date: NaiveDate) -> bool {
        record
            .range_tags
            .iter()
            .filter(|range| range.tag == self.vocabulary.statement_period)
            .any(|range| range.contains(date))
    }
}

fn contains_all<T: PartialEq>(candidates: &[T], wanted: &[T]) -> bool {
    wanted.iter().all(|tag| candidates.contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(tag: &str, start: NaiveDate, end: NaiveDate) -> Tag {
        Tag::Range(RangeTag::new(tag, Some(start), Some(end)).unwrap())
    }

    fn sample_records() -> Vec<FileRecord> {
        vec![
            FileRecord::with_tags(
                "test1.txt",
                vec![
                    Tag::Simple(SimpleTag::new("scanned")),
                    range("period", date(2014, 1, 1), date(2014, 2, 2)),
                ],
            ),
            FileRecord::with_tags(
                "test1.txt",
                vec![
                    Tag::Simple(SimpleTag::new("scanned")),
                    Tag::Value(ValueTag::new("invoice", "11")),
                ],
            ),
            FileRecord::with_tags(
                "test1.txt",
                vec![range("period", date(2014, 1, 1), date(2014, 3, 3))],
            ),
            FileRecord::with_tags("notinlist.txt", vec![Tag::Simple(SimpleTag::new("scanned"))]),
        ]
    }

    #[test]
    fn test_find_by_filename() {
        let engine = TagQueryEngine::default();
        let records = sample_records();

        let found = engine.find_by_query(&records, &FileRecord::new("test1.txt"));
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.filename == "test1.txt"));
    }

    #[test]
    fn test_find_by_filename_and_range() {
        let engine = TagQueryEngine::default();
        let records = sample_records();

        let query = FileRecord::with_tags(
            "test1.txt",
            vec![range("period", date(2014, 1, 1), date(2014, 2, 2))],
        );
        let found = engine.find_by_query(&records, &query);
        assert_eq!(found, vec![&records[0]]);
    }

    #[test]
    fn test_range_match_is_exact_not_overlap() {
        let engine = TagQueryEngine::default();
        let records = sample_records();

        let query = FileRecord::with_tags(
            "",
            vec![range("period", date(2014, 1, 10), date(2014, 1, 20))],
        );
        assert!(engine.find_by_query(&records, &query).is_empty());
    }

    #[test]
    fn test_every_query_tag_must_match() {
        let engine = TagQueryEngine::default();
        let records = sample_records();

        let query = FileRecord::with_tags("", vec![Tag::Simple(SimpleTag::new("scanned"))]);
        assert_eq!(engine.find_by_query(&records, &query).len(), 3);

        let query = FileRecord::with_tags(
            "",
            vec![
                Tag::Simple(SimpleTag::new("scanned")),
                Tag::Value(ValueTag::new("invoice", "11")),
            ],
        );
        assert_eq!(engine.find_by_query(&records, &query), vec![&records[1]]);

        let query = FileRecord::with_tags("", vec![Tag::Value(ValueTag::new("invoice", "12"))]);
        assert!(engine.find_by_query(&records, &query).is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let engine = TagQueryEngine::default();
        let records = sample_records();
        assert_eq!(engine.find_by_query(&records, &FileRecord::default()).len(), 4);
    }

    #[test]
    fn test_find_by_statement_criteria() {
        let engine = TagQueryEngine::default();
        let records = vec![
            FileRecord::with_tags(
                "statement-april.pdf",
                vec![
                    range("statement", date(2014, 4, 1), date(2014, 4, 30)),
                    Tag::Value(ValueTag::new("account", "1200")),
                ],
            ),
            FileRecord::with_tags(
                "statement-may.pdf",
                vec![
                    range("statement", date(2014, 5, 1), date(2014, 5, 31)),
                    Tag::Value(ValueTag::new("account", "1200")),
                ],
            ),
            // period and account split across two records
            FileRecord::with_tags(
                "period-only.pdf",
                vec![range("statement", date(2014, 4, 1), date(2014, 4, 30))],
            ),
            FileRecord::with_tags(
                "account-only.pdf",
                vec![Tag::Value(ValueTag::new("account", "1200"))],
            ),
        ];

        let found = engine.find_by_statement_criteria(&records, date(2014, 4, 30), 4400, 1200);
        assert_eq!(found, vec![&records[0]]);

        let found = engine.find_by_statement_criteria(&records, date(2014, 5, 1), 1200, -1);
        assert_eq!(found, vec![&records[1]]);

        let found = engine.find_by_statement_criteria(&records, date(2014, 4, 15), 4400, 8400);
        assert!(found.is_empty());

        let found = engine.find_by_statement_criteria(&records, date(2014, 6, 1), 1200, 1200);
        assert!(found.is_empty());
    }

    #[test]
    fn test_queries_are_repeatable() {
        let engine = TagQueryEngine::default();
        let records = sample_records();
        let query = FileRecord::with_tags("", vec![Tag::Simple(SimpleTag::new("scanned"))]);

        assert_eq!(
            engine.find_by_query(&records, &query),
            engine.find_by_query(&records, &query)
        );
    }
}
