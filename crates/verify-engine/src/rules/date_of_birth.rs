use chrono::{Months, NaiveDate};
use kyc_types::{ExtractedField, FieldKind, ValidationFinding};

use crate::extractors::parse_date_token;

/// Oldest believable age, in years.
const MAX_AGE_YEARS: u32 = 120;

pub fn check(field: &mut ExtractedField, today: NaiveDate) -> ValidationFinding {
    if field.is_absent() {
        return ValidationFinding::fail(FieldKind::DateOfBirth, "date of birth not found");
    }

    let Some(date) = parse_date_token(&field.raw_value) else {
        return ValidationFinding::fail(FieldKind::DateOfBirth, "date of birth is not a valid date");
    };

    if date > today {
        return ValidationFinding::fail(FieldKind::DateOfBirth, "date of birth is in the future");
    }

    // date + 120y < today means the implied age exceeds the maximum.
    let oldest_plausible = date
        .checked_add_months(Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MAX);
    if oldest_plausible < today {
        return ValidationFinding::fail(
            FieldKind::DateOfBirth,
            "date of birth implies an age over 120 years",
        );
    }

    field.normalized_value = Some(date.format("%Y-%m-%d").to_string());
    ValidationFinding::pass(FieldKind::DateOfBirth, "date of birth is plausible")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_types::Severity;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn dob_field(raw: &str) -> ExtractedField {
        ExtractedField::new(FieldKind::DateOfBirth, raw, 1.0)
    }

    #[test]
    fn valid_dob_normalizes_to_iso8601() {
        let mut field = dob_field("15/08/1990");
        let finding = check(&mut field, today());
        assert_eq!(finding.severity, Severity::Pass);
        assert_eq!(field.normalized_value.as_deref(), Some("1990-08-15"));
    }

    #[test]
    fn absent_and_garbage_fail() {
        let mut field = ExtractedField::absent(FieldKind::DateOfBirth);
        assert_eq!(check(&mut field, today()).severity, Severity::Fail);

        let mut field = dob_field("not a date");
        assert_eq!(check(&mut field, today()).severity, Severity::Fail);
        assert_eq!(field.normalized_value, None);
    }

    #[test]
    fn future_date_fails() {
        let mut field = dob_field("01/01/2999");
        let finding = check(&mut field, today());
        assert_eq!(finding.severity, Severity::Fail);
        assert!(finding.message.contains("future"));
    }

    #[test]
    fn age_over_120_fails() {
        let mut field = dob_field("01/01/1901");
        assert_eq!(check(&mut field, today()).severity, Severity::Fail);
    }

    #[test]
    fn age_exactly_120_still_passes() {
        // Born 2026-08-07 minus 120 years, checked on 2026-08-07.
        let mut field = dob_field("07/08/1906");
        assert_eq!(check(&mut field, today()).severity, Severity::Pass);
    }
}
