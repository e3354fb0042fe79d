//! Configuration management for the MMF importer

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::notebook::tokenizer::RECORD_TERMINATOR;

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Literal that ends every record in the Notebook export
    pub record_terminator: String,
    /// Source identifier written on every error record (defaults to the input file name)
    pub source_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Optional directory for a daily-rolling log file
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .set_default("import.record_terminator", RECORD_TERMINATOR)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("output.pretty", true)?
            // Optional shared configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix MMF_)
            .add_source(
                Environment::with_prefix("MMF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            record_terminator: RECORD_TERMINATOR.to_string(),
            source_name: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}
