//! Annotation parsing: tags and the dates they carry

pub mod date;
pub mod parser;

pub use parser::*;
