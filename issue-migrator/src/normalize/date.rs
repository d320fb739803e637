//! Resolution of the export's human-readable dates.
//!
//! The tracker shows recent activity relative to the viewer's clock
//! ("3 hours ago", "Jan 3 (2 days ago)") and older activity as an absolute
//! date. Relative forms resolve against the processing time and are truncated
//! to the calendar day. Unknown shapes are errors.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static FULL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{3}) (\d{1,2}), (\d{4})$").expect("Invalid regex pattern")
});
static MOMENTS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:today \()?moments ago\)?$").expect("Invalid regex pattern")
});
static MINUTES_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:today \()?(\d+) minutes? ago\)?$").expect("Invalid regex pattern")
});
static HOURS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:today|yesterday) \()?(\d+) hours? ago\)?$")
        .expect("Invalid regex pattern")
});
static DAYS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z]{3} \d{1,2} \()?(\d+) days? ago\)?$").expect("Invalid regex pattern")
});

/// A date string that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The text matches none of the known shapes.
    #[error("Unknown date format: '{0}'")]
    UnknownFormat(String),

    /// The text has a known shape but names an impossible date.
    #[error("Date out of range: '{0}'")]
    OutOfRange(String),
}

/// Resolves `text` to a calendar day.
///
/// Shapes, first match wins:
/// 1. `Jan 5, 2014`
/// 2. `moments ago`
/// 3. `N minutes ago`
/// 4. `N hours ago`, also as `Today (N hours ago)` / `Yesterday (N hours ago)`
/// 5. `Jan 3 (N days ago)` or `N days ago`
///
/// # Errors
///
/// Returns [`DateParseError`] for any other text.
pub fn resolve_date(text: &str, now: NaiveDateTime) -> Result<NaiveDate, DateParseError> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(captures) = FULL_DATE.captures(&text) {
        return absolute_date(&captures, &text);
    }

    if MOMENTS_AGO.is_match(&text) {
        return Ok(now.date());
    }

    let relative: [(&Regex, fn(i64) -> Option<TimeDelta>); 3] = [
        (&*MINUTES_AGO, TimeDelta::try_minutes),
        (&*HOURS_AGO, TimeDelta::try_hours),
        (&*DAYS_AGO, TimeDelta::try_days),
    ];
    for (pattern, to_delta) in relative {
        if let Some(captures) = pattern.captures(&text) {
            let delta = captures[1]
                .parse::<i64>()
                .ok()
                .and_then(to_delta)
                .ok_or_else(|| DateParseError::OutOfRange(text.clone()))?;
            return now
                .checked_sub_signed(delta)
                .map(|moment| moment.date())
                .ok_or(DateParseError::OutOfRange(text));
        }
    }

    Err(DateParseError::UnknownFormat(text))
}

fn absolute_date(captures: &Captures<'_>, text: &str) -> Result<NaiveDate, DateParseError> {
    let out_of_range = || DateParseError::OutOfRange(text.to_string());

    let month_name = captures[1].to_lowercase();
    let month = MONTHS
        .iter()
        .position(|m| *m == month_name)
        .ok_or_else(|| DateParseError::UnknownFormat(text.to_string()))?;
    let day: u32 = captures[2].parse().map_err(|_| out_of_range())?;
    let year: i32 = captures[3].parse().map_err(|_| out_of_range())?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day).ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 3, 10)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap()
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case("Jan 5, 2014", day(2014, 1, 5))]
    #[case("Dec 31, 2010", day(2010, 12, 31))]
    #[case("  Feb   1,  2013 ", day(2013, 2, 1))]
    #[case("moments ago", day(2014, 3, 10))]
    #[case("Today (moments ago)", day(2014, 3, 10))]
    #[case("5 minutes ago", day(2014, 3, 10))]
    #[case("1 minute ago", day(2014, 3, 10))]
    #[case("95 minutes ago", day(2014, 3, 9))]
    #[case("1 hour ago", day(2014, 3, 10))]
    #[case("3 hours ago", day(2014, 3, 9))]
    #[case("Today (1 hour ago)", day(2014, 3, 10))]
    #[case("Yesterday (20 hours ago)", day(2014, 3, 9))]
    #[case("2 days ago", day(2014, 3, 8))]
    #[case("Mar 8 (2 days ago)", day(2014, 3, 8))]
    #[case("Mar 9 (1 day ago)", day(2014, 3, 9))]
    fn resolves_known_shapes(#[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(resolve_date(text, now()).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("last week")]
    #[case("2014-01-05")]
    #[case("Jan 5 2014")]
    #[case("three hours ago")]
    fn rejects_unknown_shapes(#[case] text: &str) {
        assert!(matches!(
            resolve_date(text, now()),
            Err(DateParseError::UnknownFormat(_))
        ));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(
            resolve_date("Feb 30, 2014", now()),
            Err(DateParseError::OutOfRange(_))
        ));
        assert!(matches!(
            resolve_date("Foo 3, 2014", now()),
            Err(DateParseError::UnknownFormat(_))
        ));
        assert!(matches!(
            resolve_date("99999999999999999999 days ago", now()),
            Err(DateParseError::OutOfRange(_))
        ));
    }
}
