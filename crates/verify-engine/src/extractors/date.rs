//! Date token extraction for DD/MM/YYYY and DD-MM-YYYY forms.

use chrono::NaiveDate;

/// Earliest date of birth the pipeline accepts as a candidate.
pub const EARLIEST_DOB: (i32, u32, u32) = (1900, 1, 1);

/// Parse a `DD/MM/YYYY` or `DD-MM-YYYY` token. Rejects calendar-impossible
/// dates (e.g. 31/02/2000).
pub fn parse_date_token(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let sep = if raw.contains('/') {
        '/'
    } else if raw.contains('-') {
        '-'
    } else {
        return None;
    };

    let mut parts = raw.split(sep);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Candidate filter from the parser rules: dates outside
/// [1900-01-01, today] are not believable dates of birth.
pub fn within_plausible_range(date: NaiveDate, today: NaiveDate) -> bool {
    let (y, m, d) = EARLIEST_DOB;
    let earliest = NaiveDate::from_ymd_opt(y, m, d).expect("static date");
    date >= earliest && date <= today
}
