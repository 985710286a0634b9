//! First name → gender lexicon.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use roster_common::normalize_text;
use roster_model::Gender;

use crate::csv_utils::{get_field, read_csv_rows, require_columns};
use crate::error::{Result, StandardsError};

/// Higher-priority lexicon file, columns `name_fa,gender`.
pub const NAMES_CSV_FILE: &str = "iranian_names_full.csv";
/// Lower-priority lexicon file, `{"male": [...], "female": [...], "unisex": [...]}`.
pub const NAMES_JSON_FILE: &str = "persian_names_gender.json";

/// Leading honorifics stripped before the last lookup attempt. Longer forms first.
const HONORIFICS: [&str; 9] = [
    "سرکار خانم",
    "سرکار",
    "آقای",
    "آقا",
    "خانم",
    "دکتر",
    "مهندس",
    "استاد",
    "جناب",
];

#[derive(Debug, Default, Deserialize)]
struct GenderLists {
    #[serde(default)]
    male: Vec<String>,
    #[serde(default)]
    female: Vec<String>,
    #[serde(default)]
    unisex: Vec<String>,
}

/// Normalized Persian first names with a known gender.
///
/// Names listed as unisex are never assigned, so the same input always yields
/// the same output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameGenderLexicon {
    names: BTreeMap<String, Gender>,
}

impl NameGenderLexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads both lexicon files from `dir`; CSV entries win over JSON ones.
    ///
    /// A missing file only logs a warning. A malformed file is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut lexicon = Self::empty();
        let csv_path = dir.join(NAMES_CSV_FILE);
        if csv_path.is_file() {
            let added = lexicon.extend_from_csv(&csv_path)?;
            info!(path = %csv_path.display(), names = added, "loaded names from CSV");
        } else {
            warn!(path = %csv_path.display(), "names CSV file not found");
        }
        let json_path = dir.join(NAMES_JSON_FILE);
        if json_path.is_file() {
            let added = lexicon.extend_from_json(&json_path)?;
            info!(path = %json_path.display(), names = added, "added names from JSON");
        } else {
            warn!(path = %json_path.display(), "names JSON file not found");
        }
        if lexicon.is_empty() {
            warn!("no name lexicon found; gender detection disabled");
        }
        Ok(lexicon)
    }

    /// Adds `name_fa,gender` rows, replacing existing entries. Rows whose
    /// gender is neither male nor female are skipped.
    pub fn extend_from_csv(&mut self, path: &Path) -> Result<usize> {
        let (headers, rows) = read_csv_rows(path)?;
        require_columns(path, &headers, &["name_fa", "gender"])?;
        let mut added = 0usize;
        for row in &rows {
            let Some(gender) = Gender::parse(get_field(row, "gender")) else {
                continue;
            };
            if let Some(name) = normalize_text(get_field(row, "name_fa")) {
                self.names.insert(name, gender);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Adds male and female names not already present; unisex names are ignored.
    pub fn extend_from_json(&mut self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
        let lists: GenderLists =
            serde_json::from_str(&text).map_err(|source| StandardsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let mut added = 0usize;
        for (names, gender) in [(&lists.male, Gender::Male), (&lists.female, Gender::Female)] {
            for raw in names {
                if let Some(name) = normalize_text(raw)
                    && !self.names.contains_key(&name)
                {
                    self.names.insert(name, gender);
                    added += 1;
                }
            }
        }
        if !lists.unisex.is_empty() {
            info!(names = lists.unisex.len(), "unisex names left unassigned");
        }
        Ok(added)
    }

    pub fn insert(&mut self, name: &str, gender: Gender) {
        if let Some(name) = normalize_text(name) {
            self.names.insert(name, gender);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up a first name: the full name, then its first word, then the
    /// name with a leading honorific removed.
    pub fn detect(&self, first_name: &str) -> Option<Gender> {
        let name = normalize_text(first_name)?;
        if let Some(gender) = self.names.get(&name) {
            return Some(*gender);
        }
        if let Some(first_word) = name.split(' ').next()
            && let Some(gender) = self.names.get(first_word)
        {
            return Some(*gender);
        }
        let stripped = strip_honorific(&name)?;
        self.names.get(stripped).copied()
    }
}

fn strip_honorific(name: &str) -> Option<&str> {
    HONORIFICS.iter().find_map(|prefix| {
        let rest = name.strip_prefix(prefix)?.trim_start();
        (!rest.is_empty() && rest != name).then_some(rest)
    })
}
