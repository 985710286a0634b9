//! Source value → tag token tables.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use roster_common::lookup_key;
use roster_model::TagKind;

use crate::csv_utils::{get_field, read_csv_rows, require_columns};
use crate::error::{Result, StandardsError};

const STATUS_TAGS: &[(&str, &str)] = &[
    ("ثبت نوبت", "not_showed_patient"),
    ("چاپ نوبت", "showup_patient"),
    ("کنسل شده", "canceling_patient"),
];

const APPOINTMENT_TYPE_TAGS: &[(&str, &str)] = &[
    ("اينترنتي", "internet_user"),
    ("اینترنتی", "internet_user"),
    ("فالوآپ", "phone_user"),
    ("فالو آپ", "phone_user"),
];

const CLINIC_TAGS: &[(&str, &str)] = &[
    ("کلینیک  ویژه فوق تخصصی جراحی چاقی", "bariatric_surgery_clinic"),
    ("کلینیک  ویژه فوق تخصصی چکاپ", "checkup_specialty_clinic"),
    ("کلینیک  ویژه فوق تخصصی گوارش و کبد", "gastro_hepatology_specialty_clinic"),
    ("کلینیک بینایی سنجی", "optometry_clinic"),
    ("کلینیک تخصصی ارتوپدی", "orthopedics_clinic"),
    ("کلینیک تخصصی اورولوژی(جراحی کلیه و پروستات)", "urology_clinic"),
    ("کلینیک تخصصی بیماری های داخلی", "internal_medicine_clinic"),
    ("کلینیک تخصصی جراحی اطفال", "pediatric_surgery_clinic"),
    ("کلینیک تخصصی جراحی جنرال", "general_surgery_clinic"),
    ("کلینیک تخصصی جراحی زنان و زایمان", "obgyn_surgery_clinic"),
    ("کلینیک تخصصی جراحی عروق و واریس", "vascular_varicose_surgery_clinic"),
    ("کلینیک تخصصی جراحی فک و صورت", "oral_maxillofacial_surgery_clinic"),
    ("کلینیک تخصصی جراحی قلب", "cardiac_surgery_clinic"),
    ("کلینیک تخصصی جراحی مغز و اعصاب", "neurosurgery_clinic"),
    ("کلینیک تخصصی خون و سرطان", "hematology_oncology_clinic"),
    ("کلینیک تخصصی داخلی", "internal_specialty_clinic"),
    ("کلینیک تخصصی داخلی اطفال و نوزادان", "pediatric_neonatal_internal_clinic"),
    ("کلینیک تخصصی داخلی ریه", "pulmonology_clinic"),
    ("کلینیک تخصصی داخلی قلب و عروق", "cardiology_clinic"),
    ("کلینیک تخصصی داخلی مغز و اعصاب اطفال", "pediatric_neurology_clinic"),
    ("کلینیک تخصصی روانپزشکی", "psychiatry_clinic"),
    ("کلینیک تخصصی زیبایی و بیوتی", "aesthetics_beauty_clinic"),
    ("کلینیک تخصصی عفونی", "infectious_diseases_clinic"),
    ("کلینیک تخصصی پوست، مو و زیبایی", "dermatology_hair_aesthetics_clinic"),
    ("کلینیک تخصصی چشم", "ophthalmology_clinic"),
    ("کلینیک تخصصی گوش و حلق و بینی", "ent_clinic"),
    ("کلینیک تغذیه و رژیم درمانی", "nutrition_diet_therapy_clinic"),
    ("کلینیک جراحی پلاستیک", "plastic_surgery_clinic"),
    ("کلینیک داخلی مغز و اعصاب", "neurology_clinic"),
    ("کلینیک زخم", "wound_care_clinic"),
    ("کلینیک شنوایی سنجی", "audiology_clinic"),
    ("کلینیک فوق تخصصی اختلالات جنسی و زناشویی", "sexual_marital_disorders_clinic"),
    ("کلینیک فوق تخصصی بیماری های قلب", "cardiac_super_specialty_clinic"),
    (
        "کلینیک فوق تخصصی نفرولوژی، غدد، دیابت و تیروئید",
        "nephrology_endocrine_diabetes_thyroid_clinic",
    ),
    ("کلینیک فوق تخصصی پستان", "breast_super_specialty_clinic"),
    ("کلینیک فوق تخصصی گوارش اطفال", "pediatric_gastroenterology_clinic"),
    ("کلینیک مشاوره و روانشناسی", "counseling_psychology_clinic"),
    ("کلینیک ویژه  فوق تخصصی درد", "pain_super_specialty_clinic"),
    ("کلینیک ویژه  فوق تخصصی زانو و تعویض مفصل", "knee_joint_replacement_clinic"),
    ("کلینیک ویژه  فوق تخصصی قلب اطفال تا 15 سال", "pediatric_cardiology_clinic"),
    ("کلینیک ویژه فوق تخصصی روماتولوژی", "rheumatology_super_specialty_clinic"),
    ("کلینیک ویژه فوق تخصصی قلب", "heart_super_specialty_clinic"),
];

/// Columns of a tag extension file.
pub const TAG_TABLE_COLUMNS: [&str; 3] = ["kind", "source", "tag"];

/// Immutable-after-construction tag lookup tables, one per [`TagKind`].
///
/// Keys are stored in lookup form (normalized, lowercased), so matching is
/// tolerant of case, spacing and Arabic/Persian letter variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    tables: BTreeMap<TagKind, BTreeMap<String, String>>,
}

impl TagCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The production status, appointment-type and clinic tables.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (kind, entries) in [
            (TagKind::Status, STATUS_TAGS),
            (TagKind::AppointmentType, APPOINTMENT_TYPE_TAGS),
            (TagKind::Clinic, CLINIC_TAGS),
        ] {
            for (source, tag) in entries {
                catalog.insert(kind, source, tag);
            }
        }
        catalog
    }

    /// Adds or replaces an entry; blank sources or tags are ignored.
    pub fn insert(&mut self, kind: TagKind, source: &str, tag: &str) -> bool {
        let tag = tag.trim();
        let Some(key) = lookup_key(source) else {
            return false;
        };
        if tag.is_empty() {
            return false;
        }
        self.tables
            .entry(kind)
            .or_default()
            .insert(key, tag.to_string());
        true
    }

    /// Tag for a raw source value, if the table has one.
    pub fn lookup(&self, kind: TagKind, value: &str) -> Option<&str> {
        let key = lookup_key(value)?;
        self.tables.get(&kind)?.get(&key).map(String::as_str)
    }

    /// Entries of one table in key order.
    pub fn entries(&self, kind: TagKind) -> impl Iterator<Item = (&str, &str)> {
        self.tables
            .get(&kind)
            .into_iter()
            .flat_map(|table| table.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn len(&self, kind: TagKind) -> usize {
        self.tables.get(&kind).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }

    /// Loads `kind,source,tag` rows from a CSV file on top of the current entries.
    ///
    /// Returns the number of entries applied.
    pub fn extend_from_csv(&mut self, path: &Path) -> Result<usize> {
        let (headers, rows) = read_csv_rows(path)?;
        require_columns(path, &headers, &TAG_TABLE_COLUMNS)?;
        let mut applied = 0usize;
        for (idx, row) in rows.iter().enumerate() {
            let kind = get_field(row, "kind").parse::<TagKind>().map_err(|err| {
                StandardsError::InvalidRow {
                    path: path.to_path_buf(),
                    row: idx + 1,
                    message: err.to_string(),
                }
            })?;
            if self.insert(kind, get_field(row, "source"), get_field(row, "tag")) {
                applied += 1;
            } else {
                debug!(row = idx + 1, "skipping blank tag table row");
            }
        }
        info!(path = %path.display(), entries = applied, "loaded tag table");
        Ok(applied)
    }
}
