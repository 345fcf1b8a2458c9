use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Parse a date of birth. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and
/// zone-less `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Whole years elapsed between `date_of_birth` and `now`.
///
/// `None` when the date is absent, unparsable, or after `now`. Callers treat
/// `None` as "age unknown" and skip age-gated rules.
pub fn age_in_years(date_of_birth: Option<&str>, now: DateTime<Utc>) -> Option<u32> {
    let raw = date_of_birth?;
    let Some(dob) = parse_date_of_birth(raw) else {
        tracing::debug!("Unparsable date of birth, age-gated rules skipped");
        return None;
    };
    whole_years_between(dob, now.date_naive())
}

fn whole_years_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    if from > to {
        return None;
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
