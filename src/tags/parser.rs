//! Annotation lexer
//!
//! Grammar: `key` | `key<SEP>value` | `key<SEP>[START]<RANGESEP>[END]`,
//! where dates are fixed-width `DDMMYYYY`.

use crate::config::TagSyntax;
use crate::tags::date::{self, FIXED_DATE_WIDTH};
use crate::types::*;

/// Turns annotation strings into typed tags and back
#[derive(Debug, Clone, Default)]
pub struct TagParser {
    syntax: TagSyntax,
}

impl TagParser {
    /// Create a parser for the given separators
    pub fn new(syntax: TagSyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &TagSyntax {
        &self.syntax
    }

    /// Decide which kind of tag `raw` is without building it.
    ///
    /// Range-shaped annotations are width-checked here, so a malformed range
    /// fails with `InvalidRange` instead of being taken for a value tag.
    pub fn classify(&self, raw: &str) -> DocResult<TagKind> {
        let Some((_, rest)) = raw.split_once(self.syntax.separator) else {
            return Ok(TagKind::Simple);
        };

        if raw.ends_with(self.syntax.separator) {
            return Err(DocError::MissingValue(raw.to_string()));
        }

        if rest.contains(self.syntax.range_separator.as_str()) {
            self.split_range(raw, rest)?;
            return Ok(TagKind::Range);
        }

        Ok(TagKind::Value)
    }

    /// Parse any annotation into its tag
    pub fn parse(&self, raw: &str) -> DocResult<Tag> {
        match self.classify(raw)? {
            TagKind::Simple => Ok(Tag::Simple(SimpleTag::new(raw))),
            TagKind::Value => self.parse_value_tag(raw).map(Tag::Value),
            TagKind::Range => self.parse_range_tag(raw).map(Tag::Range),
        }
    }

    /// Parse a list of annotations, stopping at the first bad one
    pub fn parse_all<I, S>(&self, raws: I) -> DocResult<Vec<Tag>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raws.into_iter().map(|raw| self.parse(raw.as_ref())).collect()
    }

    /// Split on the first separator. A value wrapped in double quotes is
    /// unwrapped as-is, without escape processing.
    pub fn parse_value_tag(&self, raw: &str) -> DocResult<ValueTag> {
        let (key, value) = raw
            .split_once(self.syntax.separator)
            .ok_or_else(|| DocError::MissingValue(raw.to_string()))?;

        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        Ok(ValueTag::new(key, value))
    }

    /// Parse a range annotation; an absent side becomes the zero date
    pub fn parse_range_tag(&self, raw: &str) -> DocResult<RangeTag> {
        let (key, rest) = raw
            .split_once(self.syntax.separator)
            .ok_or_else(|| DocError::InvalidRange(raw.to_string()))?;

        let (start, end) = self.split_range(raw, rest)?;
        let start = start.map(date::parse_fixed8).transpose()?;
        let end = end.map(date::parse_fixed8).transpose()?;

        RangeTag::new(key, start, end)
    }

    /// Render a tag in annotation syntax
    pub fn format(&self, tag: &Tag) -> String {
        let sep = self.syntax.separator;
        match tag {
            Tag::Simple(t) => t.tag.clone(),
            Tag::Value(t) => format!("{}{}{}", t.tag, sep, t.value),
            Tag::Range(t) => format!(
                "{}{}{}{}{}",
                t.tag,
                sep,
                t.start.map(date::format_fixed8).unwrap_or_default(),
                self.syntax.range_separator,
                t.end.map(date::format_fixed8).unwrap_or_default(),
            ),
        }
    }

    fn split_range<'a>(
        &self,
        raw: &str,
        rest: &'a str,
    ) -> DocResult<(Option<&'a str>, Option<&'a str>)> {
        let range_sep = self.syntax.range_separator.as_str();
        let invalid = || DocError::InvalidRange(raw.to_string());

        if let Some(end) = rest.strip_prefix(range_sep) {
            return if is_fixed_width(end) {
                Ok((None, Some(end)))
            } else {
                Err(invalid())
            };
        }

        if let Some(start) = rest.strip_suffix(range_sep) {
            return if is_fixed_width(start) {
                Ok((Some(start), None))
            } else {
                Err(invalid())
            };
        }

        match rest.split_once(range_sep) {
            Some((start, end)) if is_fixed_width(start) && is_fixed_width(end) => {
                Ok((Some(start), Some(end)))
            }
            _ => Err(invalid()),
        }
    }
}

fn is_fixed_width(s: &str) -> bool {
    s.chars().count() == FIXED_DATE_WIDTH
}
