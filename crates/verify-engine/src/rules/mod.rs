//! Per-field validation rules. Every call returns exactly one finding;
//! absence and malformation are findings, never errors, because scoring
//! requires one finding per field unconditionally.

pub mod address;
pub mod date_of_birth;
pub mod gender;
pub mod id_number;
pub mod name;

use chrono::NaiveDate;
use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

/// Dispatch to the rule for the field's kind. Canonicalizes
/// `normalized_value` in place when validation succeeds.
pub fn check_field(field: &mut ExtractedField, today: NaiveDate) -> ValidationFinding {
    match field.kind {
        FieldKind::Name => name::check(field),
        FieldKind::DateOfBirth => date_of_birth::check(field, today),
        FieldKind::Gender => gender::check(field),
        FieldKind::IdNumber => id_number::check(field),
        FieldKind::Address => address::check(field),
    }
}

/// Collapse runs of whitespace to single spaces.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
