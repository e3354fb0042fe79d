//! Notebook export tokenizer
//!
//! Splits a cleaned export into raw records, and a raw record into ordered
//! `(code, value)` pairs. No interpretation of the codes happens here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal that ends every record in a Notebook export
pub const RECORD_TERMINATOR: &str = "%End:";

/// Start of a field line: optional angle-bracketed code followed by a colon
static FIELD_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<?(?:\d{1,3}|Incipit)>?:").expect("valid field start pattern"));

/// A complete field line, capturing code and value
static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<?(?P<code>\d{1,3}|Incipit)>?:(?P<value>.*)$").expect("valid field pattern")
});

/// Placeholder markers Notebook leaves at the end of a line. A single `%`
/// is real text.
static TRAILING_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*(?:_+|%{2,})[ \t]*$").expect("valid placeholder pattern"));

/// Text span between two record terminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub text: String,
}

impl RawRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A single `code:value` pair, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    pub code: String,
    pub value: String,
}

/// Split an export on the default record terminator
pub fn split_records(text: &str) -> Vec<RawRecord> {
    split_records_on(text, RECORD_TERMINATOR)
}

/// Split an export on `terminator`, skipping whitespace-only spans
pub fn split_records_on(text: &str, terminator: &str) -> Vec<RawRecord> {
    text.split(terminator)
        .filter(|span| !span.trim().is_empty())
        .map(RawRecord::new)
        .collect()
}

/// Break a raw record into its field pairs.
///
/// Continuation lines are joined to the preceding field with a single space,
/// trailing placeholder markers are stripped, then each line that starts with
/// a field code yields one pair. Values are returned untrimmed.
pub fn tokenize(record: &RawRecord) -> Vec<FieldPair> {
    let mut lines: Vec<String> = Vec::new();

    for line in record.text.split('\n') {
        match lines.last_mut() {
            Some(current) if !FIELD_START.is_match(line) => {
                if !line.trim().is_empty() {
                    current.push(' ');
                    current.push_str(line);
                }
            }
            _ => lines.push(line.to_string()),
        }
    }

    lines
        .iter()
        .map(|line| TRAILING_PLACEHOLDER.replace(line, ""))
        .filter_map(|line| {
            FIELD.captures(&line).map(|caps| FieldPair {
                code: caps["code"].to_string(),
                value: caps["value"].to_string(),
            })
        })
        .collect()
}
