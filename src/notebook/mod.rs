//! Notebook record parsing and normalization
//!
//! This module turns the flat-text export of the legacy MMF Notebook
//! database into works, editions, holdings and references. The stages run
//! in order: tokenizer, collator, classifier, normalizer.

pub mod classifier;
pub mod codes;
pub mod collator;
pub mod normalizer;
pub mod tokenizer;

pub use classifier::{classify, Identifiers, Verdict};
pub use collator::{collate, CollatedFields, FieldKey};
pub use normalizer::{normalize_edition, normalize_work, NormalizedRecord};
pub use tokenizer::{split_records, split_records_on, tokenize, FieldPair, RawRecord};
