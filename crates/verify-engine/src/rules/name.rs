use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

use super::collapse_whitespace;

pub fn check(field: &mut ExtractedField) -> ValidationFinding {
    let trimmed = field.raw_value.trim();
    if trimmed.chars().count() < 2 {
        return ValidationFinding::fail(FieldKind::Name, "name missing or too short");
    }

    field.normalized_value = Some(collapse_whitespace(trimmed));
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return ValidationFinding::warning(FieldKind::Name, "name contains digits");
    }

    ValidationFinding::pass(FieldKind::Name, "name present and well-formed")
}
