//! Field collation
//!
//! Resolves the ordered pairs of a record into a code-indexed multimap.
//! A repeated code never overwrites an earlier value: every occurrence stays
//! reachable through its [`FieldKey`], and through the legacy suffixed key
//! (`21`, `211`, `212`, ...) that older tooling used for the same purpose.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::FieldPair;

/// Values that carry no data: blank, or a bare bracketed code
static NULL_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:<\d{0,3}>|\[\d{0,3}\])?$").expect("valid null entry pattern"));

/// Address of one occurrence of a field code within a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub code: String,
    /// Zero-based occurrence index in source order
    pub occurrence: usize,
}

impl FieldKey {
    pub fn new(code: impl Into<String>, occurrence: usize) -> Self {
        Self {
            code: code.into(),
            occurrence,
        }
    }

    /// Key of the first occurrence of `code`
    pub fn first(code: impl Into<String>) -> Self {
        Self::new(code, 0)
    }

    /// Key as the legacy importer would have renamed it on collision
    pub fn legacy_key(&self) -> String {
        match self.occurrence {
            0 => self.code.clone(),
            n => format!("{}{}", self.code, n),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.legacy_key())
    }
}

/// Collated fields of one record.
///
/// Each code maps to its occurrences in source order. Null entries keep
/// their slot (as `None`) so that later duplicates keep their occurrence index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollatedFields {
    fields: IndexMap<String, Vec<Option<String>>>,
    pair_count: usize,
}

impl CollatedFields {
    /// First occurrence of `code`, if it survived collation
    pub fn first(&self, code: &str) -> Option<&str> {
        self.get(code, 0)
    }

    /// A specific occurrence of `code`
    pub fn get(&self, code: &str, occurrence: usize) -> Option<&str> {
        self.fields
            .get(code)
            .and_then(|values| values.get(occurrence))
            .and_then(|value| value.as_deref())
    }

    /// Value addressed by `key`
    pub fn value(&self, key: &FieldKey) -> Option<&str> {
        self.get(&key.code, key.occurrence)
    }

    /// All surviving values of `code`, in source order
    pub fn all(&self, code: &str) -> Vec<&str> {
        self.fields
            .get(code)
            .map(|values| values.iter().filter_map(|v| v.as_deref()).collect())
            .unwrap_or_default()
    }

    /// Lookup by legacy suffixed key (`011` is the second `01`).
    ///
    /// A literal code always wins over a suffixed reading of a shorter code.
    pub fn get_legacy(&self, legacy_key: &str) -> Option<&str> {
        if let Some(value) = self.first(legacy_key) {
            return Some(value);
        }
        self.keys()
            .find(|key| key.occurrence > 0 && key.legacy_key() == legacy_key)
            .and_then(|key| self.value(&key))
    }

    /// Keys of every surviving value, in source order
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.iter().flat_map(|(code, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, value)| value.is_some())
                .map(move |(occurrence, _)| FieldKey::new(code.clone(), occurrence))
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.first(code).is_some()
    }

    /// Number of surviving values
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pairs handed to [`collate`], null entries included
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }
}

/// Collate ordered pairs, trimming values and dropping null entries
pub fn collate(pairs: &[FieldPair]) -> CollatedFields {
    let mut fields: IndexMap<String, Vec<Option<String>>> = IndexMap::new();

    for pair in pairs {
        let value = pair.value.trim();
        let value = if NULL_ENTRY.is_match(value) {
            None
        } else {
            Some(value.to_string())
        };
        fields.entry(pair.code.clone()).or_default().push(value);
    }

    CollatedFields {
        fields,
        pair_count: pairs.len(),
    }
}
