//! Lookup tables the pipeline consults: tag catalog and name gender lexicon.
//!
//! Both are constructed once, explicitly, and passed into the pipeline by
//! reference. A missing lexicon file degrades to an empty lexicon.

pub mod csv_utils;
pub mod error;
pub mod gender;
pub mod tags;

pub use error::{Result, StandardsError};
pub use gender::{NAMES_CSV_FILE, NAMES_JSON_FILE, NameGenderLexicon};
pub use tags::{TAG_TABLE_COLUMNS, TagCatalog};

/// Lookup tables for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub tags: TagCatalog,
    pub genders: NameGenderLexicon,
}

impl Lookups {
    pub fn new(tags: TagCatalog, genders: NameGenderLexicon) -> Self {
        Self { tags, genders }
    }

    /// Built-in tag tables, no gender lexicon.
    pub fn builtin() -> Self {
        Self::new(TagCatalog::builtin(), NameGenderLexicon::empty())
    }
}
