//! Per-identity deduplication and bucket classification.
//!
//! Records sharing an identity number collapse to one survivor: the most
//! recent visit, with its name completed from an older row of the same group
//! when its own name is incomplete. Survivors then pass the name validator,
//! the required-field guard and the shared-phone check. Every input record
//! ends up represented in exactly one bucket or in the drop list.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use roster_model::{
    Classification, ClassifiedRecord, ExclusionReason, NormalizedRecord, PipelineOptions,
    RequiredFieldMode, RowRef, ValidationPolicy,
};
use roster_transform::{is_complete_name, name_violation};

/// Most recent visit first; records without a visit go last.
fn by_visit_descending(a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
    match (a.visit_instant, b.visit_instant) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn has_complete_name(record: &NormalizedRecord, min_len: usize) -> bool {
    is_complete_name(
        record.first_name.as_deref(),
        record.last_name.as_deref(),
        min_len,
    )
}

/// Outcome of resolving one identity group.
#[derive(Debug)]
enum GroupOutcome {
    Accepted(ClassifiedRecord),
    IncompleteName(ClassifiedRecord),
}

/// Records sharing one identity number. Never empty: a group is created
/// from its first record.
#[derive(Debug)]
struct IdentityGroup {
    first: NormalizedRecord,
    rest: Vec<NormalizedRecord>,
}

impl IdentityGroup {
    fn new(first: NormalizedRecord) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    fn push(&mut self, record: NormalizedRecord) {
        self.rest.push(record);
    }

    /// Picks the survivor: the most recent visit, earliest input row on ties.
    ///
    /// When the survivor's name is incomplete it is completed from the first
    /// older row, most recent first, that has a complete name.
    fn resolve(self, min_len: usize) -> GroupOutcome {
        let mut survivor = self.first;
        let mut older = Vec::with_capacity(self.rest.len());
        for record in self.rest {
            if by_visit_descending(&record, &survivor) == Ordering::Less {
                older.push(std::mem::replace(&mut survivor, record));
            } else {
                older.push(record);
            }
        }
        older.sort_by(|a, b| by_visit_descending(a, b).then(a.origin.cmp(&b.origin)));

        let mut sources: Vec<RowRef> = std::iter::once(survivor.origin)
            .chain(older.iter().map(|record| record.origin))
            .collect();
        sources.sort();

        if has_complete_name(&survivor, min_len) {
            return GroupOutcome::Accepted(ClassifiedRecord::with_sources(survivor, sources));
        }
        let Some(donor) = older
            .into_iter()
            .find(|record| has_complete_name(record, min_len))
        else {
            return GroupOutcome::IncompleteName(ClassifiedRecord::with_sources(
                survivor, sources,
            ));
        };
        debug!(
            survivor = %survivor.origin,
            donor = %donor.origin,
            "completing survivor name from older row"
        );
        survivor.first_name = donor.first_name;
        survivor.last_name = donor.last_name;
        survivor.gender = donor.gender;
        survivor.full_name_raw = match (&survivor.first_name, &survivor.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => donor.full_name_raw,
        };
        GroupOutcome::Accepted(ClassifiedRecord::with_sources(survivor, sources))
    }
}

fn validate_name(entry: &ClassifiedRecord, policy: &ValidationPolicy) -> Option<ExclusionReason> {
    let record = &entry.record;
    let full_name = record.display_name().unwrap_or_default();
    name_violation(
        &full_name,
        record.first_name.as_deref(),
        record.last_name.as_deref(),
        policy,
    )
}

fn has_required_fields(record: &NormalizedRecord) -> bool {
    record.identity_number.is_some() && record.first_name.is_some() && record.last_name.is_some()
}

/// Final guard on identity, first and last name. Entries failing it go to
/// the excluded bucket or the drop list, depending on `mode`.
fn required_field_guard(
    entries: Vec<ClassifiedRecord>,
    mode: RequiredFieldMode,
    result: &mut Classification,
) -> Vec<ClassifiedRecord> {
    let mut survivors = Vec::with_capacity(entries.len());
    let mut missing_required = 0usize;
    for entry in entries {
        if has_required_fields(&entry.record) {
            survivors.push(entry);
            continue;
        }
        missing_required += 1;
        match mode {
            RequiredFieldMode::RouteToExcluded => result
                .excluded
                .push(entry.excluded(ExclusionReason::MissingRequired)),
            RequiredFieldMode::Drop => result.dropped.push(entry),
        }
    }
    if missing_required > 0 {
        warn!(
            rows = missing_required,
            ?mode,
            "survivors missing identity, first or last name"
        );
    }
    survivors
}

/// Classifies normalized records into the four output buckets.
///
/// Records arrive in input order. The result is deterministic for a given
/// input and options: groups are visited in identity-number order.
pub fn classify(records: Vec<NormalizedRecord>, options: &PipelineOptions) -> Classification {
    let policy = &options.policy;
    let mut result = Classification::default();

    let mut groups: BTreeMap<String, IdentityGroup> = BTreeMap::new();
    for record in records {
        match record.identity_number.clone() {
            Some(identity) => match groups.entry(identity) {
                Entry::Vacant(slot) => {
                    slot.insert(IdentityGroup::new(record));
                }
                Entry::Occupied(mut slot) => slot.get_mut().push(record),
            },
            None => {
                debug!(row = %record.origin, "no valid identity number");
                result.excluded.push(
                    ClassifiedRecord::single(record).excluded(ExclusionReason::MissingIdentity),
                );
            }
        }
    }
    let group_count = groups.len();

    let mut accepted = Vec::with_capacity(group_count);
    for group in groups.into_values() {
        match group.resolve(policy.min_name_len) {
            GroupOutcome::Accepted(entry) => accepted.push(entry),
            GroupOutcome::IncompleteName(entry) => {
                debug!(row = %entry.record.origin, "no complete name in identity group");
                result.incomplete_name.push(entry);
            }
        }
    }

    let mut guarded = Vec::with_capacity(accepted.len());
    for entry in accepted {
        if let Some(reason) = validate_name(&entry, policy) {
            debug!(row = %entry.record.origin, %reason, "name rejected");
            result.excluded.push(entry.excluded(reason));
        } else {
            guarded.push(entry);
        }
    }

    let survivors = required_field_guard(guarded, options.required_fields, &mut result);

    let mut phone_counts: HashMap<&str, usize> = HashMap::new();
    for entry in &survivors {
        if let Some(phone) = entry.record.phone.as_deref() {
            *phone_counts.entry(phone).or_insert(0) += 1;
        }
    }
    let shared: Vec<bool> = survivors
        .iter()
        .map(|entry| {
            entry
                .record
                .phone
                .as_deref()
                .and_then(|phone| phone_counts.get(phone))
                .is_some_and(|count| *count > 1)
        })
        .collect();
    for (entry, is_shared) in survivors.into_iter().zip(shared) {
        if is_shared {
            result.duplicate_phone.push(entry);
        } else {
            result.cleaned.push(entry);
        }
    }

    info!(
        identities = group_count,
        cleaned = result.cleaned.len(),
        excluded = result.excluded.len(),
        duplicate_phone = result.duplicate_phone.len(),
        incomplete_name = result.incomplete_name.len(),
        dropped = result.dropped.len(),
        "classification complete"
    );
    result
}
