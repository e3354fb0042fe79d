//! MMF Notebook importer
//!
//! Parses the flat-text export of the legacy MMF Notebook card catalogue
//! into works, editions, holdings and references, with an error record for
//! every record that could not be fully normalized.

pub mod config;
pub mod error;
pub mod models;
pub mod notebook;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, RecordIssue};
pub use services::RecordProcessor;
