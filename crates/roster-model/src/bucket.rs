//! Classification outcomes.
//!
//! Routing a record to a side bucket is a successful classification, not an
//! error: every bucket is surfaced to the caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::NormalizedRecord;
use crate::table::RowRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Cleaned,
    Excluded,
    DuplicatePhone,
    IncompleteName,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Self::Cleaned,
        Self::Excluded,
        Self::DuplicatePhone,
        Self::IncompleteName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::Excluded => "excluded",
            Self::DuplicatePhone => "duplicate_phone",
            Self::IncompleteName => "incomplete_name",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record landed in the excluded bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Identity number absent or failed validation.
    MissingIdentity,
    /// Name contains an anonymous-caller marker phrase.
    AnonymousCaller,
    LatinLetters,
    /// Name contains periods or hyphens.
    Punctuation,
    NameTooShort,
    NumericName,
    /// Identity, first or last name missing at the final guard.
    MissingRequired,
}

impl ExclusionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingIdentity => "missing_identity",
            Self::AnonymousCaller => "anonymous_caller",
            Self::LatinLetters => "latin_letters",
            Self::Punctuation => "punctuation",
            Self::NameTooShort => "name_too_short",
            Self::NumericName => "numeric_name",
            Self::MissingRequired => "missing_required",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record in one of the output buckets together with the input rows it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: NormalizedRecord,
    /// All input rows this record represents (a survivor represents its whole group).
    pub sources: Vec<RowRef>,
    pub exclusion: Option<ExclusionReason>,
}

impl ClassifiedRecord {
    pub fn single(record: NormalizedRecord) -> Self {
        let origin = record.origin;
        Self {
            record,
            sources: vec![origin],
            exclusion: None,
        }
    }

    pub fn with_sources(record: NormalizedRecord, sources: Vec<RowRef>) -> Self {
        Self {
            record,
            sources,
            exclusion: None,
        }
    }

    pub fn excluded(mut self, reason: ExclusionReason) -> Self {
        self.exclusion = Some(reason);
        self
    }
}

/// All four output buckets of one run, plus rows discarded by the drop policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub cleaned: Vec<ClassifiedRecord>,
    pub excluded: Vec<ClassifiedRecord>,
    pub duplicate_phone: Vec<ClassifiedRecord>,
    pub incomplete_name: Vec<ClassifiedRecord>,
    /// Only populated under `RequiredFieldMode::Drop`.
    pub dropped: Vec<ClassifiedRecord>,
}

impl Classification {
    pub fn bucket(&self, bucket: Bucket) -> &[ClassifiedRecord] {
        match bucket {
            Bucket::Cleaned => &self.cleaned,
            Bucket::Excluded => &self.excluded,
            Bucket::DuplicatePhone => &self.duplicate_phone,
            Bucket::IncompleteName => &self.incomplete_name,
        }
    }

    /// Every input row accounted for, across buckets and the drop list.
    pub fn source_rows(&self) -> Vec<RowRef> {
        let mut rows: Vec<RowRef> = Bucket::ALL
            .iter()
            .flat_map(|bucket| self.bucket(*bucket).iter())
            .chain(self.dropped.iter())
            .flat_map(|entry| entry.sources.iter().copied())
            .collect();
        rows.sort();
        rows
    }

    pub fn counts(&self) -> BucketCounts {
        let mut exclusion_reasons = BTreeMap::new();
        for entry in &self.excluded {
            if let Some(reason) = entry.exclusion {
                *exclusion_reasons.entry(reason).or_insert(0) += 1;
            }
        }
        BucketCounts {
            cleaned: self.cleaned.len(),
            excluded: self.excluded.len(),
            duplicate_phone: self.duplicate_phone.len(),
            incomplete_name: self.incomplete_name.len(),
            dropped: self.dropped.len(),
            source_rows: self.source_rows().len(),
            exclusion_reasons,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub cleaned: usize,
    pub excluded: usize,
    pub duplicate_phone: usize,
    pub incomplete_name: usize,
    pub dropped: usize,
    pub source_rows: usize,
    pub exclusion_reasons: BTreeMap<ExclusionReason, usize>,
}
