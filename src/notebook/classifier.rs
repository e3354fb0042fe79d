//! Record classification
//!
//! Notebook has no record-type field: whether a record is a princeps or a
//! re-edition is read off the shape of its identifier. Re-edition identifiers
//! are twelve free characters, a space, then the princeps identifier, so they
//! always contain a work signature too and must be tested first.

use once_cell::sync::Lazy;
use regex::Regex;

use super::codes::{IDENTIFIER_CODES, TRANSLATION_CODES};
use super::collator::{CollatedFields, FieldKey};
use crate::error::RecordIssue;

/// Work signature body: date (or `nd`) and country, author code, title code
const WORK_SIGNATURE: &str = r"(?:\d{2}|nd)[A-Za-z]{2}\.[A-Z ]{3}\.[a-z0-9]{3}";

/// Prefix marking a suppressed translation field
pub const SUPPRESSION_PREFIX: &str = "ZZ";

/// Deleted or suppressed identifiers: filler runs, `ENTERED`, or `ZZ` in place of a date
pub static HIDDEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[*\-=_?#]{3,}|Z{2,})|\bENTERED\b").expect("valid hidden pattern")
});

/// Work signature anywhere in the identifier
pub static WORK_SIGNATURE_ANYWHERE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?P<work>{WORK_SIGNATURE})")).expect("valid work signature")
});

/// Princeps identifier: starts with the work signature
pub static WORK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*(?P<work>{WORK_SIGNATURE})")).expect("valid work pattern")
});

/// Re-edition identifier: twelve characters, a space, the work signature
pub static EDITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*(?P<edition>.{{12}} (?P<work>{WORK_SIGNATURE}))"))
        .expect("valid edition pattern")
});

/// Identifiers recovered from the full identifier field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    /// Field that held the full identifier
    pub key: FieldKey,
    pub full: String,
    pub work_identifier: String,
    /// Only set for re-editions
    pub ed_identifier: Option<String>,
}

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Deliberately suppressed in the legacy catalogue; produces nothing
    Hidden,
    /// Princeps
    Work(Identifiers),
    /// Re-edition of a princeps
    Edition(Identifiers),
    Malformed(RecordIssue),
}

/// Locate the full identifier: code `0`, else code `1`
pub fn full_identifier(fields: &CollatedFields) -> Option<(FieldKey, &str)> {
    IDENTIFIER_CODES
        .iter()
        .find_map(|code| fields.first(code).map(|value| (FieldKey::first(*code), value)))
}

/// Whether a translation field carries the suppression prefix
fn translation_suppressed(fields: &CollatedFields) -> bool {
    TRANSLATION_CODES
        .iter()
        .filter_map(|code| fields.first(code))
        .any(|value| value.starts_with(SUPPRESSION_PREFIX))
}

/// Classify a collated record. The first matching rule wins.
pub fn classify(fields: &CollatedFields) -> Verdict {
    let Some((key, identifier)) = full_identifier(fields) else {
        return Verdict::Malformed(RecordIssue::NoIdentifier);
    };

    if HIDDEN_PATTERN.is_match(identifier) || translation_suppressed(fields) {
        return Verdict::Hidden;
    }

    if !WORK_SIGNATURE_ANYWHERE.is_match(identifier) {
        return Verdict::Malformed(RecordIssue::IncompleteIdentifiers);
    }

    if let Some(caps) = EDITION_PATTERN.captures(identifier) {
        return Verdict::Edition(Identifiers {
            key,
            full: identifier.to_string(),
            work_identifier: caps["work"].to_string(),
            ed_identifier: Some(caps["edition"].to_string()),
        });
    }

    if let Some(caps) = WORK_PATTERN.captures(identifier) {
        return Verdict::Work(Identifiers {
            key,
            full: identifier.to_string(),
            work_identifier: caps["work"].to_string(),
            ed_identifier: None,
        });
    }

    Verdict::Malformed(RecordIssue::InvalidIdentifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::collator::collate;
    use crate::notebook::tokenizer::FieldPair;

    fn fields(pairs: &[(&str, &str)]) -> CollatedFields {
        let pairs: Vec<FieldPair> = pairs
            .iter()
            .map(|(code, value)| FieldPair {
                code: code.to_string(),
                value: value.to_string(),
            })
            .collect();
        collate(&pairs)
    }

    #[test]
    fn test_signature_patterns() {
        assert!(WORK_PATTERN.is_match("02FR.ABC.xyz"));
        assert!(WORK_PATTERN.is_match("ndFR.AB .x1z"));
        assert!(!WORK_PATTERN.is_match("2FR.ABC.xyz"));
        assert!(!WORK_PATTERN.is_match("02FR.abc.xyz"));
        assert!(EDITION_PATTERN.is_match("64FR001 Lyon 02FR.ABC.xyz"));
        assert!(!EDITION_PATTERN.is_match("02FR.ABC.xyz"));
    }

    #[test]
    fn test_princeps() {
        let verdict = classify(&fields(&[("0", "02FR.ABC.xyz")]));
        match verdict {
            Verdict::Work(ids) => {
                assert_eq!(ids.work_identifier, "02FR.ABC.xyz");
                assert_eq!(ids.key, FieldKey::first("0"));
                assert_eq!(ids.ed_identifier, None);
            }
            other => panic!("expected work, got {:?}", other),
        }
    }

    #[test]
    fn test_edition_checked_before_work() {
        let verdict = classify(&fields(&[("0", "64FR001 Lyon 02FR.ABC.xyz")]));
        match verdict {
            Verdict::Edition(ids) => {
                assert_eq!(ids.work_identifier, "02FR.ABC.xyz");
                assert_eq!(ids.ed_identifier.as_deref(), Some("64FR001 Lyon 02FR.ABC.xyz"));
            }
            other => panic!("expected edition, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_identifier_code() {
        let verdict = classify(&fields(&[("1", "02FR.ABC.xyz")]));
        assert!(matches!(verdict, Verdict::Work(ids) if ids.key == FieldKey::first("1")));
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(
            classify(&fields(&[("5", "Titre")])),
            Verdict::Malformed(RecordIssue::NoIdentifier)
        );
        assert_eq!(
            classify(&fields(&[("0", "[0]")])),
            Verdict::Malformed(RecordIssue::NoIdentifier)
        );
    }

    #[test]
    fn test_hidden_beats_valid_identifier() {
        let verdict = classify(&fields(&[("0", "64FR001 Lyon 02FR.ABC.xyz ENTERED")]));
        assert_eq!(verdict, Verdict::Hidden);
        assert_eq!(classify(&fields(&[("0", "*****")])), Verdict::Hidden);
        assert_eq!(classify(&fields(&[("0", "ZZFR.ABC.xyz")])), Verdict::Hidden);
    }

    #[test]
    fn test_hidden_by_translation() {
        let verdict = classify(&fields(&[("0", "02FR.ABC.xyz"), ("4", "ZZ trad.")]));
        assert_eq!(verdict, Verdict::Hidden);
    }

    #[test]
    fn test_hidden_by_edition_translation_code() {
        let verdict = classify(&fields(&[("0", "02FR.ABC.xyz"), ("04", "ZZ trad.")]));
        assert_eq!(verdict, Verdict::Hidden);
    }

    #[test]
    fn test_hidden_edition_by_translation() {
        let edition = "64FR001 Lyon 02FR.ABC.xyz";
        assert_eq!(
            classify(&fields(&[("0", edition), ("04", "ZZ Übers.")])),
            Verdict::Hidden
        );
        assert_eq!(
            classify(&fields(&[("0", edition), ("4", "ZZ trad.")])),
            Verdict::Hidden
        );
        assert!(matches!(
            classify(&fields(&[("0", edition), ("04", "trad. anglaise")])),
            Verdict::Edition(_)
        ));
    }

    #[test]
    fn test_hidden_beats_malformed() {
        assert_eq!(classify(&fields(&[("0", "---- gone")])), Verdict::Hidden);
    }

    #[test]
    fn test_incomplete_identifiers() {
        assert_eq!(
            classify(&fields(&[("0", "something else")])),
            Verdict::Malformed(RecordIssue::IncompleteIdentifiers)
        );
    }

    #[test]
    fn test_invalid_identifier() {
        assert_eq!(
            classify(&fields(&[("0", "see 02FR.ABC.xyz")])),
            Verdict::Malformed(RecordIssue::InvalidIdentifier)
        );
    }
}
