//! Human-facing date rendering.
//!
//! Dates are shown as `YYYY.MM.DD` in UTC. Recent timestamps are rendered
//! relative to a reference instant, falling back to the calendar date once
//! they are a week old. No endpoint accepts dates, so parsing exists only to
//! pin the format down in tests.

use chrono::{DateTime, TimeDelta, Utc};

const DATE_FORMAT: &str = "%Y.%m.%d";

/// Error returned when a date string is not `YYYY.MM.DD`.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date '{value}' must use the YYYY.MM.DD format")]
pub(crate) struct ParseDateError {
    pub(crate) value: String,
}

/// Render `instant` as `YYYY.MM.DD`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use jam_backend::domain::dates::format_date;
///
/// let instant = Utc.with_ymd_and_hms(2026, 1, 9, 23, 59, 0).single().expect("valid");
/// assert_eq!(format_date(instant), "2026.01.09");
/// ```
#[must_use]
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY.MM.DD` date into midnight UTC.
#[cfg(test)]
pub(crate) fn parse_date(text: &str) -> Result<DateTime<Utc>, ParseDateError> {
    use chrono::{NaiveDate, NaiveTime};

    let date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| ParseDateError {
        value: text.to_owned(),
    })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Render `instant` relative to `now`.
///
/// Instants in the future are treated as happening now.
#[must_use]
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(instant).max(TimeDelta::zero());
    if elapsed < TimeDelta::minutes(1) {
        "just now".to_owned()
    } else if elapsed < TimeDelta::hours(1) {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed < TimeDelta::days(1) {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed < TimeDelta::days(7) {
        plural(elapsed.num_days(), "day")
    } else {
        format_date(instant)
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn instant(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, second)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("2026.03.01")]
    #[case("1999.12.31")]
    #[case("2024.02.29")]
    fn formatting_a_parsed_date_round_trips(#[case] text: &str) {
        let parsed = parse_date(text).expect("valid date");
        assert_eq!(format_date(parsed), text);
    }

    #[rstest]
    fn parsed_dates_are_midnight_utc() {
        assert_eq!(
            parse_date("2026.03.14").expect("valid date"),
            instant(14, 0, 0, 0)
        );
    }

    #[rstest]
    fn parsing_a_formatted_instant_truncates_to_the_day() {
        let original = instant(14, 17, 45, 3);
        let reparsed = parse_date(&format_date(original)).expect("valid date");
        assert_eq!(reparsed, instant(14, 0, 0, 0));
    }

    #[rstest]
    #[case("2026-03-01")]
    #[case("2026.13.01")]
    #[case("2023.02.29")]
    #[case("")]
    fn malformed_dates_are_rejected(#[case] text: &str) {
        let err = parse_date(text).expect_err("malformed date");
        assert_eq!(err.value, text);
    }

    #[rstest]
    #[case(instant(10, 12, 0, 30), "just now")]
    #[case(instant(10, 12, 1, 0), "just now")]
    #[case(instant(10, 11, 59, 0), "1 minute ago")]
    #[case(instant(10, 11, 15, 0), "45 minutes ago")]
    #[case(instant(10, 9, 0, 0), "3 hours ago")]
    #[case(instant(9, 12, 0, 0), "1 day ago")]
    #[case(instant(4, 12, 0, 1), "5 days ago")]
    #[case(instant(3, 12, 0, 0), "2026.03.03")]
    fn relative_rendering(#[case] then: DateTime<Utc>, #[case] expected: &str) {
        assert_eq!(format_relative(then, instant(10, 12, 0, 0)), expected);
    }
}
