use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

use super::collapse_whitespace;

/// Minimum plausible address length, in characters.
const MIN_ADDRESS_CHARS: usize = 10;

pub fn check(field: &mut ExtractedField) -> ValidationFinding {
    let trimmed = field.raw_value.trim();
    if trimmed.chars().count() < MIN_ADDRESS_CHARS {
        return ValidationFinding::warning(FieldKind::Address, "address missing or too short");
    }

    field.normalized_value = Some(collapse_whitespace(trimmed));
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return ValidationFinding::warning(
            FieldKind::Address,
            "address has no house number or postal code",
        );
    }

    ValidationFinding::pass(FieldKind::Address, "address looks complete")
}
