//! MMF Import - Notebook export converter
//!
//! Reads a transliterated Notebook export and writes the normalized
//! entities and error records as a JSON report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use mmf_import::{
    config::{AppConfig, LoggingConfig},
    models::ImportReport,
    services::{load_source, source_name},
    RecordProcessor,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mmf-import")]
#[command(about = "Convert raw output from the Notebook MMF database into structured records")]
#[command(version)]
struct Args {
    /// The raw (transliterated) text file to convert
    #[arg(short, long, env = "MMF_INPUT")]
    input: PathBuf,

    /// Where to write the JSON report (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source identifier written on error records
    #[arg(long)]
    source_name: Option<String>,

    /// Record terminator used by the export
    #[arg(long)]
    terminator: Option<String>,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(terminator) = args.terminator {
        config.import.record_terminator = terminator;
    }
    if let Some(name) = args.source_name {
        config.import.source_name = Some(name);
    }
    if args.compact {
        config.output.pretty = false;
    }

    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting MMF import v{}", env!("CARGO_PKG_VERSION"));

    let text = load_source(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let source = config
        .import
        .source_name
        .clone()
        .unwrap_or_else(|| source_name(&args.input));

    let processor = RecordProcessor::new(source)
        .with_terminator(config.import.record_terminator.clone());
    let outcome = processor.process(&text);
    let counts = outcome.counts;

    let report = ImportReport::new(processor.source(), outcome);
    write_report(&report, args.output.as_ref(), config.output.pretty)?;

    eprintln!(
        "{} records processed: {} successes, {} errors, {} hidden",
        counts.total, counts.successes, counts.errors, counts.hidden
    );

    Ok(())
}

/// Initialize tracing; the returned guard flushes the log file on drop
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mmf_import={}", logging.level).into());

    let stderr_layer = if logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "mmf-import.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn write_report(report: &ImportReport, output: Option<&PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}
