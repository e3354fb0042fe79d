//! Import services

pub mod processor;
pub mod source;

pub use processor::{RecordOutcome, RecordProcessor};
pub use source::{decode_source, load_source, source_name};
