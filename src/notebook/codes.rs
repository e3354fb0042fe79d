//! Legacy Notebook field codes
//!
//! The same numeric code means different things depending on whether a record
//! is a princeps or a re-edition, so there are two tables. Both map a field
//! slot to an [`Attribute`]; the shells in [`WorkShell`] and [`EditionShell`]
//! decide which attributes they can hold.
//!
//! Within a table, the first slot present for an attribute wins. Later slots
//! feeding the same attribute are left unconsumed and reported as unused.

use super::collator::FieldKey;

/// Normalized attribute a field code feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    WorkIdentifier,
    EdIdentifier,
    EditionCounter,
    Translation,
    Author,
    Translator,
    Title,
    ShortTitle,
    LongTitle,
    CollectionTitle,
    PublicationDetails,
    Holdings,
    ContemporaryReferences,
    LaterReferences,
    Comments,
    FinalComments,
    BurReferences,
    BurComments,
    OriginalTitle,
    TranslationComments,
    Description,
    FirstText,
}

/// One occurrence of a code, as addressed by a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub code: &'static str,
    pub occurrence: usize,
}

impl FieldSlot {
    pub const fn first(code: &'static str) -> Self {
        Self {
            code,
            occurrence: 0,
        }
    }

    pub const fn nth(code: &'static str, occurrence: usize) -> Self {
        Self { code, occurrence }
    }

    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.code, self.occurrence)
    }
}

/// Codes that may hold the full record identifier, in order of preference
pub const IDENTIFIER_CODES: [&str; 2] = ["0", "1"];

/// Entry/exit markers with no bibliographic content
pub const STRUCTURAL_CODES: [&str; 3] = ["16", "17", "27"];

/// Translation fields inspected for the suppression prefix
pub const TRANSLATION_CODES: [&str; 2] = ["4", "04"];

/// Princeps (work) record codes
pub const WORK_CODES: &[(FieldSlot, Attribute)] = &[
    (FieldSlot::first("1"), Attribute::WorkIdentifier),
    (FieldSlot::first("4"), Attribute::Translation),
    (FieldSlot::first("2"), Attribute::Author),
    (FieldSlot::first("3"), Attribute::Translator),
    (FieldSlot::first("5"), Attribute::Title),
    (FieldSlot::first("6"), Attribute::PublicationDetails),
    (FieldSlot::first("7"), Attribute::Holdings),
    (FieldSlot::first("8"), Attribute::ContemporaryReferences),
    (FieldSlot::first("9"), Attribute::LaterReferences),
    (FieldSlot::first("10"), Attribute::Comments),
    (FieldSlot::first("11"), Attribute::BurReferences),
    (FieldSlot::first("12"), Attribute::BurComments),
    (FieldSlot::first("13"), Attribute::OriginalTitle),
    (FieldSlot::first("14"), Attribute::TranslationComments),
    (FieldSlot::first("15"), Attribute::Description),
    (FieldSlot::first("19"), Attribute::FinalComments),
    (FieldSlot::first("30"), Attribute::FirstText),
    (FieldSlot::first("Incipit"), Attribute::FirstText),
];

/// Re-edition record codes.
///
/// `20` outranks `011` for the edition counter. The second `01` is the same
/// field as a literal `011` in older exports.
pub const EDITION_CODES: &[(FieldSlot, Attribute)] = &[
    (FieldSlot::first("1"), Attribute::WorkIdentifier),
    (FieldSlot::first("01"), Attribute::EdIdentifier),
    (FieldSlot::first("20"), Attribute::EditionCounter),
    (FieldSlot::nth("01", 1), Attribute::EditionCounter),
    (FieldSlot::first("011"), Attribute::EditionCounter),
    (FieldSlot::first("04"), Attribute::Translation),
    (FieldSlot::first("02"), Attribute::Author),
    (FieldSlot::first("03"), Attribute::Translator),
    (FieldSlot::first("21"), Attribute::ShortTitle),
    (FieldSlot::first("22"), Attribute::LongTitle),
    (FieldSlot::first("23"), Attribute::CollectionTitle),
    (FieldSlot::first("24"), Attribute::PublicationDetails),
    (FieldSlot::first("25"), Attribute::Holdings),
    (FieldSlot::first("26"), Attribute::Comments),
    (FieldSlot::first("19"), Attribute::FinalComments),
    (FieldSlot::first("30"), Attribute::FirstText),
    (FieldSlot::first("Incipit"), Attribute::FirstText),
];

/// Whether `table` has any entry for `code`
pub fn defines_code(table: &[(FieldSlot, Attribute)], code: &str) -> bool {
    table.iter().any(|(slot, _)| slot.code == code)
}

/// Something that can receive attribute values
pub trait Shell {
    /// Storage for `attribute`, or `None` if this shell has no such attribute
    fn slot_mut(&mut self, attribute: Attribute) -> Option<&mut Option<String>>;

    /// Store `value` if the attribute exists and is still empty
    fn fill(&mut self, attribute: Attribute, value: &str) -> bool {
        match self.slot_mut(attribute) {
            Some(slot) if slot.is_none() => {
                *slot = Some(value.to_string());
                true
            }
            _ => false,
        }
    }

    fn accepts(&mut self, attribute: Attribute) -> bool {
        self.slot_mut(attribute).is_some()
    }
}

/// Work attributes gathered before a [`Work`](crate::models::Work) is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkShell {
    pub work_identifier: Option<String>,
    pub translation: Option<String>,
    pub title: Option<String>,
    pub comments: Option<String>,
    pub bur_references: Option<String>,
    pub bur_comments: Option<String>,
    pub original_title: Option<String>,
    pub translation_comments: Option<String>,
    pub description: Option<String>,
    pub contemporary_references: Option<String>,
    pub later_references: Option<String>,
}

impl Shell for WorkShell {
    fn slot_mut(&mut self, attribute: Attribute) -> Option<&mut Option<String>> {
        match attribute {
            Attribute::WorkIdentifier => Some(&mut self.work_identifier),
            Attribute::Translation => Some(&mut self.translation),
            Attribute::Title => Some(&mut self.title),
            Attribute::Comments => Some(&mut self.comments),
            Attribute::BurReferences => Some(&mut self.bur_references),
            Attribute::BurComments => Some(&mut self.bur_comments),
            Attribute::OriginalTitle => Some(&mut self.original_title),
            Attribute::TranslationComments => Some(&mut self.translation_comments),
            Attribute::Description => Some(&mut self.description),
            Attribute::ContemporaryReferences => Some(&mut self.contemporary_references),
            Attribute::LaterReferences => Some(&mut self.later_references),
            _ => None,
        }
    }
}

/// Edition attributes gathered before an [`Edition`](crate::models::Edition) is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditionShell {
    pub work_identifier: Option<String>,
    pub ed_identifier: Option<String>,
    pub edition_counter: Option<String>,
    pub translation: Option<String>,
    pub author: Option<String>,
    pub translator: Option<String>,
    pub short_title: Option<String>,
    pub long_title: Option<String>,
    pub collection_title: Option<String>,
    pub publication_details: Option<String>,
    pub comments: Option<String>,
    pub final_comments: Option<String>,
    pub first_text: Option<String>,
    pub holdings: Option<String>,
}

impl Shell for EditionShell {
    fn slot_mut(&mut self, attribute: Attribute) -> Option<&mut Option<String>> {
        match attribute {
            Attribute::WorkIdentifier => Some(&mut self.work_identifier),
            Attribute::EdIdentifier => Some(&mut self.ed_identifier),
            Attribute::EditionCounter => Some(&mut self.edition_counter),
            Attribute::Translation => Some(&mut self.translation),
            Attribute::Author => Some(&mut self.author),
            Attribute::Translator => Some(&mut self.translator),
            Attribute::ShortTitle => Some(&mut self.short_title),
            Attribute::LongTitle => Some(&mut self.long_title),
            Attribute::CollectionTitle => Some(&mut self.collection_title),
            Attribute::PublicationDetails => Some(&mut self.publication_details),
            Attribute::Comments => Some(&mut self.comments),
            Attribute::FinalComments => Some(&mut self.final_comments),
            Attribute::FirstText => Some(&mut self.first_text),
            Attribute::Holdings => Some(&mut self.holdings),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_codes_fit_edition_shell() {
        let mut shell = EditionShell::default();
        for (slot, attribute) in EDITION_CODES {
            assert!(
                shell.accepts(*attribute),
                "edition code {} maps to {:?}, which editions cannot hold",
                slot.code,
                attribute
            );
        }
    }

    #[test]
    fn test_work_codes_fit_some_shell() {
        let mut work = WorkShell::default();
        let mut edition = EditionShell::default();
        for (slot, attribute) in WORK_CODES {
            assert!(
                work.accepts(*attribute) || edition.accepts(*attribute),
                "work code {} maps to {:?}, which no shell can hold",
                slot.code,
                attribute
            );
        }
    }

    #[test]
    fn test_fill_never_overwrites() {
        let mut shell = EditionShell::default();
        assert!(shell.fill(Attribute::Author, "Voltaire"));
        assert!(!shell.fill(Attribute::Author, "Rousseau"));
        assert_eq!(shell.author.as_deref(), Some("Voltaire"));
        assert!(!shell.fill(Attribute::Title, "nope"));
    }

    #[test]
    fn test_second_edition_identifier_is_legacy_011() {
        assert_eq!(FieldSlot::nth("01", 1).key().legacy_key(), "011");
        assert!(defines_code(EDITION_CODES, "011"));
        assert!(!defines_code(WORK_CODES, "01"));
    }
}
