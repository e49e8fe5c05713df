use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

use crate::checksum;
use crate::extractors::{classify_id, IdPattern};

pub fn check(field: &mut ExtractedField) -> ValidationFinding {
    if field.is_absent() {
        return ValidationFinding::fail(FieldKind::IdNumber, "no ID number detected");
    }

    match classify_id(&field.raw_value) {
        Some(IdPattern::Aadhaar(digits)) => {
            if !checksum::validate(&digits) {
                return ValidationFinding::fail(
                    FieldKind::IdNumber,
                    "Aadhaar number fails its checksum",
                );
            }
            field.normalized_value = Some(digits);
            ValidationFinding::pass(FieldKind::IdNumber, "Aadhaar number checksum is valid")
        }
        Some(IdPattern::Pan(code)) => {
            field.normalized_value = Some(code);
            ValidationFinding::pass(FieldKind::IdNumber, "PAN number is well-formed")
        }
        None => ValidationFinding::fail(
            FieldKind::IdNumber,
            "ID number is not a recognized Aadhaar or PAN format",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_types::Severity;

    fn id_field(raw: &str) -> ExtractedField {
        ExtractedField::new(FieldKind::IdNumber, raw, 1.0)
    }

    #[test]
    fn valid_aadhaar_passes_and_normalizes_ungrouped() {
        let mut field = id_field("2345 6789 0124");
        let finding = check(&mut field);
        assert_eq!(finding.severity, Severity::Pass);
        assert_eq!(field.normalized_value.as_deref(), Some("234567890124"));
    }

    #[test]
    fn checksum_failure_fails() {
        // The prototype's sample number does not pass Verhoeff.
        let mut field = id_field("1234 5678 9012");
        let finding = check(&mut field);
        assert_eq!(finding.severity, Severity::Fail);
        assert!(finding.message.contains("checksum"));
        assert_eq!(field.normalized_value, None);
    }

    #[test]
    fn structural_pan_passes() {
        let mut field = id_field("ABCDE1234F");
        let finding = check(&mut field);
        assert_eq!(finding.severity, Severity::Pass);
        assert_eq!(field.normalized_value.as_deref(), Some("ABCDE1234F"));
    }

    #[test]
    fn absent_and_malformed_fail() {
        let mut field = ExtractedField::absent(FieldKind::IdNumber);
        assert_eq!(check(&mut field).severity, Severity::Fail);

        let mut field = id_field("12 34");
        assert_eq!(check(&mut field).severity, Severity::Fail);
    }
}
