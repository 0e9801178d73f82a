//! Configuration for annotation syntax and the reconciliation tag vocabulary

use serde::{Deserialize, Serialize};

/// Separators used in annotation strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSyntax {
    /// Splits key from value, e.g. `invoice:RE4711`
    pub separator: char,
    /// Splits the two dates of a range, e.g. `01042014..30042014`
    pub range_separator: String,
}

impl Default for TagSyntax {
    fn default() -> Self {
        Self {
            separator: ':',
            range_separator: "..".to_string(),
        }
    }
}

/// Tag keys the reconciliation engine looks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagVocabulary {
    /// Value tag holding an invoice/document number
    pub invoice_number: String,
    /// Range tag holding the period a bank statement covers
    pub statement_period: String,
    /// Value tag holding an account number
    pub account_number: String,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            invoice_number: "invoice".to_string(),
            statement_period: "statement".to_string(),
            account_number: "account".to_string(),
        }
    }
}

/// Complete configuration for a document archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    pub syntax: TagSyntax,
    pub vocabulary: TagVocabulary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconciliationConfig::default();
        assert_eq!(config.syntax.separator, ':');
        assert_eq!(config.syntax.range_separator, "..");
        assert_eq!(config.vocabulary.invoice_number, "invoice");
        assert_eq!(config.vocabulary.statement_period, "statement");
        assert_eq!(config.vocabulary.account_number, "account");
    }
}
