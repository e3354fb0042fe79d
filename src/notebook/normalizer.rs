//! Record normalization
//!
//! Maps the collated fields of a classified record onto work and edition
//! shells, then derives the edition counter, titles, holdings and references.
//!
//! Every field is tracked: anything no shell ends up holding is reported as an
//! unused code, attached to the entities the record did produce.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::classifier::Identifiers;
use super::codes::{
    defines_code, Attribute, EditionShell, FieldSlot, Shell, WorkShell, EDITION_CODES,
    STRUCTURAL_CODES, WORK_CODES,
};
use super::collator::{CollatedFields, FieldKey};
use crate::error::RecordIssue;
use crate::models::{Edition, Holding, Reference, ReferenceType, Work};

/// Marker between the two stored halves of a title
static SEGMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Z[12]").expect("valid segment marker pattern"));

/// Library short name: place, hyphen, uppercase abbreviation (`Paris-BNF`).
/// The place is a single word, so surrounding prose never joins the name.
pub static HOLDING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\p{Lu}[\p{L}.'\-]*?-\p{Lu}[\p{Lu}\d]+\b").expect("valid holding pattern")
});

static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid page pattern"));

/// Length of an edition counter
pub const EDITION_COUNTER_LEN: usize = 7;

/// Counter suffix of the princeps, which is edition zero of its own work
pub const PRINCEPS_COUNTER_SUFFIX: &str = "000";

/// Entities produced from one record, plus non-fatal diagnostics
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub work: Option<Work>,
    pub edition: Edition,
    pub holdings: Vec<Holding>,
    pub references: Vec<Reference>,
    pub issues: Vec<RecordIssue>,
}

/// Tracks which fields of a record have been consumed
struct Ledger<'a> {
    fields: &'a CollatedFields,
    consumed: HashSet<FieldKey>,
}

impl<'a> Ledger<'a> {
    fn new(fields: &'a CollatedFields, identifier: &FieldKey) -> Self {
        let mut consumed: HashSet<FieldKey> = fields
            .keys()
            .filter(|key| STRUCTURAL_CODES.contains(&key.code.as_str()))
            .collect();
        consumed.insert(identifier.clone());
        Self { fields, consumed }
    }

    /// Value at `slot` if present and not yet consumed
    fn available(&self, slot: &FieldSlot) -> Option<(FieldKey, &'a str)> {
        let key = slot.key();
        if self.consumed.contains(&key) {
            return None;
        }
        self.fields.value(&key).map(|value| (key, value))
    }

    fn consume(&mut self, key: FieldKey) {
        self.consumed.insert(key);
    }

    fn unused(&self) -> Option<RecordIssue> {
        let unused: BTreeSet<String> = self
            .fields
            .keys()
            .filter(|key| !self.consumed.contains(key))
            .map(|key| key.legacy_key())
            .collect();

        if unused.is_empty() {
            None
        } else {
            Some(RecordIssue::UnusedCodes(unused))
        }
    }
}

/// Normalize a re-edition record
pub fn normalize_edition(fields: &CollatedFields, ids: &Identifiers) -> NormalizedRecord {
    let mut ledger = Ledger::new(fields, &ids.key);
    let mut shell = EditionShell::default();

    for (slot, attribute) in EDITION_CODES {
        if let Some((key, value)) = ledger.available(slot) {
            if shell.fill(*attribute, value) {
                ledger.consume(key);
            }
        }
    }

    // Re-editions sometimes reuse princeps codes
    for (slot, attribute) in WORK_CODES {
        if defines_code(EDITION_CODES, slot.code) {
            continue;
        }
        if let Some((key, value)) = ledger.available(slot) {
            if shell.fill(*attribute, value) {
                tracing::trace!("Salvaged princeps code {} into edition", key);
                ledger.consume(key);
            }
        }
    }

    shell.fill(Attribute::WorkIdentifier, &ids.work_identifier);
    if let Some(ed_identifier) = &ids.ed_identifier {
        shell.fill(Attribute::EdIdentifier, ed_identifier);
    }
    shell.edition_counter = shell
        .edition_counter
        .map(|counter| truncate_chars(&counter, EDITION_COUNTER_LEN));
    reassemble_edition_titles(&mut shell);

    let edition = Edition::from_shell(shell, None);
    let mut issues = Vec::new();
    let holdings = collect_holdings(&edition, &mut issues);
    issues.extend(ledger.unused());

    NormalizedRecord {
        work: None,
        edition,
        holdings,
        references: Vec::new(),
        issues,
    }
}

/// Normalize a princeps record into a work and its initial edition
pub fn normalize_work(fields: &CollatedFields, ids: &Identifiers) -> NormalizedRecord {
    let mut ledger = Ledger::new(fields, &ids.key);
    let mut work_shell = WorkShell::default();
    let mut edition_shell = EditionShell::default();

    for (slot, attribute) in WORK_CODES {
        if let Some((key, value)) = ledger.available(slot) {
            let to_work = work_shell.fill(*attribute, value);
            let to_edition = edition_shell.fill(*attribute, value);
            if to_work || to_edition {
                ledger.consume(key);
            }
        }
    }

    if let Some(title) = work_shell.title.take() {
        let segments = split_segments(&title);
        let short = segments.first().filter(|s| !s.is_empty()).cloned();
        work_shell.title = short.clone();
        edition_shell.short_title = short;
        edition_shell.long_title = Some(segments.concat()).filter(|s| !s.is_empty());
    }

    let prefix: String = ids.full.chars().take(4).collect();
    edition_shell.edition_counter = Some(format!("{prefix}{PRINCEPS_COUNTER_SUFFIX}"));

    // Salvage edition-only codes into whichever shell still has room
    for (slot, attribute) in EDITION_CODES {
        if defines_code(WORK_CODES, slot.code) {
            continue;
        }
        if let Some((key, value)) = ledger.available(slot) {
            if work_shell.fill(*attribute, value) || edition_shell.fill(*attribute, value) {
                tracing::trace!("Salvaged edition code {} into princeps", key);
                ledger.consume(key);
            }
        }
    }

    work_shell.fill(Attribute::WorkIdentifier, &ids.work_identifier);
    edition_shell.fill(Attribute::WorkIdentifier, &ids.work_identifier);
    edition_shell.fill(Attribute::EdIdentifier, &ids.work_identifier);

    let contemporary = work_shell.contemporary_references.take();
    let later = work_shell.later_references.take();

    let work = Work::from_shell(work_shell);
    let edition = Edition::from_shell(edition_shell, Some(work.uuid));

    let mut issues = Vec::new();
    let holdings = collect_holdings(&edition, &mut issues);
    let references = explode_references(work.uuid, contemporary.as_deref(), later.as_deref());
    issues.extend(ledger.unused());

    NormalizedRecord {
        work: Some(work),
        edition,
        holdings,
        references,
        issues,
    }
}

/// Split a title on its segment markers, trimming each segment
pub fn split_segments(title: &str) -> Vec<String> {
    SEGMENT_MARKER
        .split(title)
        .map(|segment| segment.trim().to_string())
        .collect()
}

fn reassemble_edition_titles(shell: &mut EditionShell) {
    let Some(short) = shell.short_title.take() else {
        return;
    };

    if SEGMENT_MARKER.is_match(&short) {
        let segments = split_segments(&short);
        let mut long = segments.concat();
        if let Some(rest) = shell.long_title.take() {
            long.push_str(&rest);
        }
        shell.short_title = segments.first().filter(|s| !s.is_empty()).cloned();
        shell.long_title = Some(long).filter(|s| !s.is_empty());
    } else {
        if let Some(long) = shell.long_title.take() {
            shell.long_title = Some(format!("{short}{long}"));
        }
        shell.short_title = Some(short);
    }
}

fn truncate_chars(value: &str, len: usize) -> String {
    value.chars().take(len).collect()
}

/// Library names found in a holdings statement
pub fn holding_names(text: &str) -> Vec<&str> {
    HOLDING_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .collect()
}

fn collect_holdings(edition: &Edition, issues: &mut Vec<RecordIssue>) -> Vec<Holding> {
    let Some(text) = edition.holdings.as_deref() else {
        return Vec::new();
    };

    let holdings: Vec<Holding> = holding_names(text)
        .into_iter()
        .map(|name| Holding::new(edition.uuid, name))
        .collect();

    if holdings.is_empty() {
        issues.push(RecordIssue::JunkHoldings);
    }
    holdings
}

/// Explode the reference lists of a work.
///
/// Both lists are separated by double spaces. Later references are also
/// scanned for page numbers, yielding one reference per page.
pub fn explode_references(
    work_uuid: Uuid,
    contemporary: Option<&str>,
    later: Option<&str>,
) -> Vec<Reference> {
    let mut references: Vec<Reference> = contemporary
        .map(reference_items)
        .unwrap_or_default()
        .into_iter()
        .map(|item| Reference::new(work_uuid, item, None, ReferenceType::Contemporary))
        .collect();

    for item in later.map(reference_items).unwrap_or_default() {
        let pages: Vec<u32> = PAGE_NUMBER
            .find_iter(item)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if pages.is_empty() {
            references.push(Reference::new(work_uuid, item, None, ReferenceType::PostC18));
            continue;
        }

        let name = reference_name(item);
        references.extend(
            pages
                .into_iter()
                .map(|page| Reference::new(work_uuid, name.clone(), Some(page), ReferenceType::PostC18)),
        );
    }

    references
}

fn reference_items(list: &str) -> Vec<&str> {
    list.split("  ")
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Reference name with page numbers removed
fn reference_name(item: &str) -> String {
    let stripped = PAGE_NUMBER.replace_all(item, "");
    let name = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '.') || c.is_whitespace())
        .to_string();

    if name.is_empty() {
        item.to_string()
    } else {
        name
    }
}
