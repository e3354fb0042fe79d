//! Import integration tests

use mmf_import::models::{Entity, ImportOutcome, ReferenceType};
use mmf_import::notebook::split_records;
use mmf_import::{RecordIssue, RecordProcessor};
use serde_json::Value;

const SOURCE: &str = "mmf-export.txt";

fn process(text: &str) -> ImportOutcome {
    RecordProcessor::new(SOURCE).process(text)
}

fn count<F: Fn(&Entity) -> bool>(outcome: &ImportOutcome, pred: F) -> usize {
    outcome.entities.iter().filter(|&e| pred(e)).count()
}

/// A small export exercising every record outcome
const EXPORT: &str = "\
0:02FR.ABC.xyz
2:Voltaire
5:CandideZ1 ou l'optimisme
7:Paris-BNF, Lyon-BM
8:Journal des savants  Mercure de France
9:Cioranescu 12 45  Conlon
16:
%End:
0:64FR001 Lyon 02FR.ABC.xyz
02:Voltaire
21:Candide
22:, ou l'optimisme
20:64FR001
25:Genève-BPU
%End:
0:===== entry removed
5:Gone
%End:
5:Sans identifiant
%End:
0:pas de cote
%End:
0:voir 02FR.ABC.xyz
%End:
0:70FR.DUP.abc
5:Titre
19:Fin
99:mystery
25:nowhere
%End:
";

#[test]
fn test_princeps_end_to_end() {
    let outcome = process("0:02FR.ABC.xyz\n5:Le TitreZ1 Suite\n7:Paris-BNF\n%End:\n");

    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.entities.len(), 3);

    let work = outcome.entities[0].as_work().expect("work first");
    assert_eq!(work.title.as_deref(), Some("Le Titre"));

    let edition = outcome.entities[1].as_edition().expect("edition second");
    assert_eq!(edition.short_title.as_deref(), Some("Le Titre"));
    assert_eq!(edition.long_title.as_deref(), Some("Le TitreSuite"));
    assert_eq!(edition.edition_counter.as_deref(), Some("02FR000"));
    assert_eq!(edition.work_uuid, Some(work.uuid));
    assert_eq!(edition.work_id, None);

    let holding = outcome.entities[2].as_holding().expect("holding third");
    assert_eq!(holding.short_name, "Paris-BNF");
    assert_eq!(holding.edition_uuid, edition.uuid);

    assert_eq!(outcome.counts.total, 1);
    assert_eq!(outcome.counts.successes, 1);
    assert_eq!(outcome.counts.errors, 0);
}

#[test]
fn test_missing_identifier_end_to_end() {
    let outcome = process("5:Un titre\n6:Paris, 1750\n%End:\n");

    assert!(outcome.entities.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].error_note, "No identifier");
    assert_eq!(outcome.errors[0].source, SOURCE);
    assert_eq!(outcome.counts.errors, 1);
}

#[test]
fn test_every_record_accounted_for() {
    let outcome = process(EXPORT);
    let raw_records = split_records(EXPORT).len();

    assert_eq!(raw_records, 7);
    assert_eq!(outcome.counts.total, raw_records);
    assert_eq!(
        outcome.counts.successes + outcome.counts.errors + outcome.counts.hidden,
        raw_records
    );

    let primary = count(&outcome, |e| matches!(e, Entity::Edition(_)));
    let fatal_notes: Vec<String> = [
        RecordIssue::NoIdentifier,
        RecordIssue::IncompleteIdentifiers,
        RecordIssue::InvalidIdentifier,
        RecordIssue::JunkHoldings,
        RecordIssue::UnusedCodes(["99".to_string()].into()),
    ]
    .iter()
    .filter(|issue| issue.is_fatal())
    .map(ToString::to_string)
    .collect();
    assert_eq!(fatal_notes.len(), 3);

    let fatal = outcome
        .errors
        .iter()
        .filter(|e| fatal_notes.contains(&e.error_note))
        .count();
    assert_eq!(primary + fatal + outcome.counts.hidden, raw_records);

    assert_eq!(outcome.counts.successes, 3);
    assert_eq!(outcome.counts.errors, 3);
    assert_eq!(outcome.counts.hidden, 1);
}

#[test]
fn test_error_notes_in_processing_order() {
    let outcome = process(EXPORT);
    let notes: Vec<&str> = outcome.errors.iter().map(|e| e.error_note.as_str()).collect();

    // Records run last to first
    assert_eq!(
        notes,
        vec![
            "Junk holdings",
            "Unused codes: {99}",
            "Invalid identifier",
            "Incomplete identifiers",
            "No identifier",
        ]
    );
}

#[test]
fn test_unused_codes_attach_to_entities() {
    let outcome = process(EXPORT);
    let work = outcome.entities[0].as_work().expect("last record processed first");
    assert_eq!(work.work_identifier.as_deref(), Some("70FR.DUP.abc"));

    let unused = outcome
        .errors
        .iter()
        .find(|e| e.error_note.starts_with("Unused codes"))
        .expect("unused codes error");
    assert_eq!(unused.work_uuid, Some(work.uuid));
    assert!(unused.edition_uuid.is_some());
    assert!(unused.text.contains("99:mystery"));
}

#[test]
fn test_princeps_references_and_holdings() {
    let outcome = process(EXPORT);

    let work = outcome
        .entities
        .iter()
        .filter_map(Entity::as_work)
        .find(|w| w.work_identifier.as_deref() == Some("02FR.ABC.xyz"))
        .expect("Candide princeps");
    assert_eq!(work.title.as_deref(), Some("Candide"));

    let references: Vec<_> = outcome
        .entities
        .iter()
        .filter_map(Entity::as_reference)
        .filter(|r| r.work_uuid == work.uuid)
        .collect();

    let contemporary: Vec<&str> = references
        .iter()
        .filter(|r| r.ref_type == ReferenceType::Contemporary)
        .map(|r| r.short_name.as_str())
        .collect();
    assert_eq!(contemporary, vec!["Journal des savants", "Mercure de France"]);

    let later: Vec<(&str, Option<u32>)> = references
        .iter()
        .filter(|r| r.ref_type == ReferenceType::PostC18)
        .map(|r| (r.short_name.as_str(), r.page_num))
        .collect();
    assert_eq!(
        later,
        vec![("Cioranescu", Some(12)), ("Cioranescu", Some(45)), ("Conlon", None)]
    );

    let holdings: Vec<&str> = outcome
        .entities
        .iter()
        .filter_map(Entity::as_holding)
        .map(|h| h.short_name.as_str())
        .collect();
    assert!(holdings.contains(&"Paris-BNF"));
    assert!(holdings.contains(&"Lyon-BM"));
    assert!(holdings.contains(&"Genève-BPU"));
}

#[test]
fn test_re_edition_record() {
    let outcome = process(EXPORT);

    let edition = outcome
        .entities
        .iter()
        .filter_map(Entity::as_edition)
        .find(|e| e.ed_identifier.as_deref() == Some("64FR001 Lyon 02FR.ABC.xyz"))
        .expect("Lyon re-edition");
    assert_eq!(edition.work_identifier.as_deref(), Some("02FR.ABC.xyz"));
    assert_eq!(edition.work_uuid, None);
    assert_eq!(edition.edition_counter.as_deref(), Some("64FR001"));
    assert_eq!(edition.long_title.as_deref(), Some("Candide, ou l'optimisme"));
}

#[test]
fn test_report_json_shape() {
    let outcome = process("0:02FR.ABC.xyz\n5:Titre\n7:Paris-BNF\n9:Smith 3\n%End:");
    let json: Value = serde_json::to_value(&outcome).expect("serializable");

    let entities = json["entities"].as_array().expect("entities array");
    let types: Vec<&str> = entities.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(types, vec!["work", "edition", "holding", "reference"]);

    assert!(entities[1].get("holdings").is_none());
    assert_eq!(entities[3]["ref_type"], "post-C18");
    assert_eq!(entities[3]["page_num"], 3);
    assert_eq!(json["counts"]["successes"], 1);
}
