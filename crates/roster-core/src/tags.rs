//! Tag derivation from status, appointment type and clinic.

use roster_model::{Classification, NormalizedRecord, TagKind, TagSet};
use roster_standards::TagCatalog;

/// Baseline tags, then the status, appointment-type and clinic tags in that
/// order. Values without a table entry contribute nothing.
pub fn derive_tags(record: &NormalizedRecord, catalog: &TagCatalog) -> TagSet {
    let mut tags = TagSet::baseline();
    let sources = [
        (TagKind::Status, record.status_raw.as_deref()),
        (TagKind::AppointmentType, record.appointment_type_raw.as_deref()),
        (TagKind::Clinic, record.clinic_raw.as_deref()),
    ];
    for (kind, value) in sources {
        if let Some(tag) = value.and_then(|value| catalog.lookup(kind, value)) {
            tags.insert(tag);
        }
    }
    tags
}

/// Attaches tags to every record in every bucket.
pub fn apply_tags(classification: &mut Classification, catalog: &TagCatalog) {
    let Classification {
        cleaned,
        excluded,
        duplicate_phone,
        incomplete_name,
        dropped,
    } = classification;
    for entry in cleaned
        .iter_mut()
        .chain(excluded.iter_mut())
        .chain(duplicate_phone.iter_mut())
        .chain(incomplete_name.iter_mut())
        .chain(dropped.iter_mut())
    {
        entry.record.tags = derive_tags(&entry.record, catalog);
    }
}
