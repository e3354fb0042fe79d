//! Record processing service
//!
//! Drives tokenizer, collator, classifier and normalizer over a whole export
//! and gathers entities, error records and counters.

use crate::{
    error::RecordIssue,
    models::{Entity, ErrorRecord, ImportCounts, ImportOutcome},
    notebook::{
        classify, collate, normalize_edition, normalize_work, split_records_on, tokenize,
        tokenizer::RECORD_TERMINATOR, NormalizedRecord, RawRecord, Verdict,
    },
};

/// What a single raw record turned into
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    /// Suppressed in the legacy catalogue; nothing to report
    Hidden,
    /// No entity could be produced
    Rejected(ErrorRecord),
    /// Entities, plus any non-fatal diagnostics about them
    Normalized {
        entities: Vec<Entity>,
        errors: Vec<ErrorRecord>,
    },
}

#[derive(Debug, Clone)]
pub struct RecordProcessor {
    source: String,
    terminator: String,
}

impl RecordProcessor {
    /// Create a processor whose error records name `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            terminator: RECORD_TERMINATOR.to_string(),
        }
    }

    /// Use a different record terminator
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Process a whole export.
    ///
    /// Records are handled last to first. Nothing is returned until the
    /// whole batch has been processed.
    pub fn process(&self, text: &str) -> ImportOutcome {
        let records = split_records_on(text, &self.terminator);
        tracing::info!("Processing {} records from {}", records.len(), self.source);

        let mut outcome = ImportOutcome::default();

        for record in records.iter().rev() {
            outcome.counts.total += 1;

            match self.process_record(record) {
                RecordOutcome::Hidden => {
                    outcome.counts.hidden += 1;
                }
                RecordOutcome::Rejected(error) => {
                    outcome.counts.errors += 1;
                    outcome.errors.push(error);
                }
                RecordOutcome::Normalized { entities, errors } => {
                    outcome.counts.successes += 1;
                    outcome.entities.extend(entities);
                    outcome.errors.extend(errors);
                }
            }

            if outcome.counts.total % 1000 == 0 {
                tracing::info!("{} records processed", outcome.counts.total);
            }
        }

        log_counts(&outcome.counts, outcome.errors.len());
        outcome
    }

    /// Run one raw record through the pipeline
    pub fn process_record(&self, record: &RawRecord) -> RecordOutcome {
        let pairs = tokenize(record);
        let fields = collate(&pairs);
        let text = record.text.trim();

        let normalized = match classify(&fields) {
            Verdict::Hidden => {
                tracing::debug!("Hidden record skipped: {}", first_line(text));
                return RecordOutcome::Hidden;
            }
            Verdict::Malformed(issue) => {
                debug_assert!(issue.is_fatal());
                tracing::warn!("Rejected record ({}): {}", issue, first_line(text));
                return RecordOutcome::Rejected(ErrorRecord::new(&self.source, text, &issue));
            }
            Verdict::Work(ids) => {
                tracing::debug!("Princeps {}", ids.work_identifier);
                normalize_work(&fields, &ids)
            }
            Verdict::Edition(ids) => {
                tracing::debug!(
                    "Re-edition {}",
                    ids.ed_identifier.as_deref().unwrap_or(&ids.full)
                );
                normalize_edition(&fields, &ids)
            }
        };

        self.collect(normalized, text)
    }

    fn collect(&self, normalized: NormalizedRecord, text: &str) -> RecordOutcome {
        let NormalizedRecord {
            work,
            edition,
            holdings,
            references,
            issues,
        } = normalized;

        let work_uuid = work.as_ref().map(|w| w.uuid);
        let edition_uuid = edition.uuid;

        let errors = issues
            .iter()
            .map(|issue| {
                debug_assert!(!issue.is_fatal());
                tracing::warn!("{} in record {}", issue, first_line(text));
                let error = ErrorRecord::new(&self.source, text, issue)
                    .with_edition(Some(edition_uuid));
                match issue {
                    RecordIssue::JunkHoldings => error,
                    _ => error.with_work(work_uuid),
                }
            })
            .collect();

        let mut entities = Vec::with_capacity(2 + holdings.len() + references.len());
        entities.extend(work.map(Entity::Work));
        entities.push(Entity::Edition(edition));
        entities.extend(holdings.into_iter().map(Entity::Holding));
        entities.extend(references.into_iter().map(Entity::Reference));

        RecordOutcome::Normalized { entities, errors }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn log_counts(counts: &ImportCounts, error_records: usize) {
    tracing::info!(
        "Import finished: {} records, {} successes, {} errors, {} hidden ({} error records)",
        counts.total,
        counts.successes,
        counts.errors,
        counts.hidden,
        error_records
    );
}
