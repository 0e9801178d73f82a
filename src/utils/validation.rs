//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that a filename is usable as an archive key
pub fn validate_filename(filename: &str) -> DocResult<()> {
    if filename.trim().is_empty() {
        return Err(DocError::Validation(
            "Filename cannot be empty".to_string(),
        ));
    }

    if filename.len() > 255 {
        return Err(DocError::Validation(
            "Filename cannot exceed 255 characters".to_string(),
        ));
    }

    if filename.contains(['/', '\\', '\0']) {
        return Err(DocError::Validation(format!(
            "Filename '{}' cannot contain path separators",
            filename
        )));
    }

    Ok(())
}

/// Validate that a tag key is non-blank
pub fn validate_tag_key(tag: &Tag) -> DocResult<()> {
    if tag.key().trim().is_empty() {
        return Err(DocError::Validation("Tag key cannot be empty".to_string()));
    }

    Ok(())
}

/// Validate that a range tag does not start after it ends
pub fn validate_range_bounds(range: &RangeTag) -> DocResult<()> {
    if !range.is_ordered() {
        return Err(DocError::Validation(format!(
            "Range tag '{}' starts after it ends",
            range.tag
        )));
    }

    Ok(())
}

/// Enhanced file record validator with detailed checks
pub struct EnhancedFileRecordValidator;

impl FileRecordValidator for EnhancedFileRecordValidator {
    fn validate_file_record(&self, record: &FileRecord) -> DocResult<()> {
        validate_filename(&record.filename)?;

        for tag in record.tags() {
            validate_tag_key(&tag)?;
        }

        for range in &record.range_tags {
            validate_range_bounds(range)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("scan-0001.pdf").is_ok());
        assert!(validate_filename("  ").is_err());
        assert!(validate_filename("dir/scan.pdf").is_err());
        assert!(validate_filename(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_enhanced_validator_rejects_reversed_range() {
        let start = NaiveDate::from_ymd_opt(2014, 5, 1);
        let end = NaiveDate::from_ymd_opt(2014, 4, 1);
        let record = FileRecord::with_tags(
            "statement.pdf",
            [Tag::Range(RangeTag::new("statement", start, end).unwrap())],
        );

        assert!(DefaultFileRecordValidator.validate_file_record(&record).is_ok());
        assert!(matches!(
            EnhancedFileRecordValidator.validate_file_record(&record),
            Err(DocError::Validation(_))
        ));
    }

    #[test]
    fn test_enhanced_validator_rejects_blank_keys() {
        let record = FileRecord::with_tags("scan.pdf", [Tag::Value(ValueTag::new("", "1"))]);
        assert!(EnhancedFileRecordValidator
            .validate_file_record(&record)
            .is_err());
    }
}
