//! # Docrecon Core
//!
//! A document annotation and reconciliation library: scanned files carry
//! small typed tags, and bookkeeping ledger exports are matched against the
//! files that evidence each booking.
//!
//! ## Features
//!
//! - **Tag annotations**: `key`, `key:value` and `key:DDMMYYYY..DDMMYYYY` tags with ambiguity checks
//! - **Tag queries**: exact multi-criteria filtering of file records and statement-period lookups
//! - **Ledger import**: semicolon-separated exports in German number and date notation
//! - **Reconciliation**: two-pass matching by document number, then by statement period and account
//! - **Storage abstraction**: Database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use docrecon_core::{FileRecord, ReconciliationEngine, TagParser};
//! use docrecon_core::ledger::LedgerImporter;
//!
//! let parser = TagParser::default();
//! let tags = parser.parse_all(["invoice:RE1"]).unwrap();
//! let records = vec![FileRecord::with_tags("invoice-1.pdf", tags)];
//!
//! let export = "header\n02.01.2014;02.01.2014;RE;1;Rent;500,00;4210;1200;;;;500,00;EUR\n";
//! let entries = LedgerImporter::new().parse_str(export).unwrap();
//!
//! let report = ReconciliationEngine::default()
//!     .reconcile(&entries, &records, true)
//!     .unwrap();
//! assert_eq!(report.matches[0].file.filename, "invoice-1.pdf");
//! ```

pub mod archive;
pub mod config;
pub mod ledger;
pub mod query;
pub mod reconciliation;
pub mod tags;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use archive::*;
pub use config::*;
pub use query::*;
pub use reconciliation::*;
pub use tags::TagParser;
pub use traits::*;
pub use types::*;
