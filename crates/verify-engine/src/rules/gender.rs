use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

/// Canonicalize a recognized gender token.
fn canonical(token: &str) -> Option<&'static str> {
    match token.trim().to_lowercase().as_str() {
        "male" | "m" => Some("Male"),
        "female" | "f" => Some("Female"),
        "other" => Some("Other"),
        _ => None,
    }
}

pub fn check(field: &mut ExtractedField) -> ValidationFinding {
    if field.is_absent() {
        return ValidationFinding::fail(FieldKind::Gender, "gender not found");
    }

    match canonical(&field.raw_value) {
        Some(value) => {
            field.normalized_value = Some(value.to_string());
            ValidationFinding::pass(FieldKind::Gender, "gender recognized")
        }
        None => ValidationFinding::fail(FieldKind::Gender, "gender is not a recognized value"),
    }
}
