//! Ledger export parsing: single rows and whole files

pub mod import;
pub mod record;

pub use import::*;
pub use record::*;
