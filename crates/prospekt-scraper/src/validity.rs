//! Brochure validity evaluation from free-text date spans.
//!
//! Catalog pages state validity as either a range (`"03.03.2025 - 08.03.2025"`)
//! or a start date only (`"ab 03.03.2025"`). Dates are compared at day
//! granularity against the local wall-clock date of the evaluation instant.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use prospekt_core::ValidityWindow;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}\.\d{2}\.\d{4})\s*-\s*(\d{2}\.\d{2}\.\d{4})").expect("valid range regex")
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("valid date regex"));

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Evaluates `text` against `now`.
///
/// Returns `(is_valid, window)`. The window is `None` when no date was found
/// or a matched date is not a real calendar day (e.g. `31.02.2024`); such
/// text is never valid. A range is valid when `start <= today <= end`, both
/// bounds inclusive. A lone start date is valid from that day on.
#[must_use]
pub fn evaluate(text: &str, now: NaiveDateTime) -> (bool, Option<ValidityWindow>) {
    let today = now.date();

    if let Some(caps) = RANGE_RE.captures(text) {
        let (Some(start), Some(end)) = (parse_date(&caps[1]), parse_date(&caps[2])) else {
            tracing::debug!(text, "date range is not a valid calendar range");
            return (false, None);
        };
        let is_valid = start <= today && today <= end;
        return (
            is_valid,
            Some(ValidityWindow {
                valid_from: start,
                valid_to: Some(end),
                evaluated_at: now,
                is_valid,
            }),
        );
    }

    if let Some(m) = DATE_RE.find(text) {
        let Some(start) = parse_date(m.as_str()) else {
            tracing::debug!(text, "start date is not a valid calendar date");
            return (false, None);
        };
        let is_valid = start <= today;
        return (
            is_valid,
            Some(ValidityWindow {
                valid_from: start,
                valid_to: None,
                evaluated_at: now,
                is_valid,
            }),
        );
    }

    (false, None)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_range_is_valid_with_both_bounds() {
        let (valid, window) = evaluate("01.01.2024 - 31.12.2099", at(2025, 1, 1));
        assert!(valid);
        let window = window.unwrap();
        assert_eq!(window.valid_from, date(2024, 1, 1));
        assert_eq!(window.valid_to, Some(date(2099, 12, 31)));
        assert_eq!(window.evaluated_at, at(2025, 1, 1));
        assert!(window.is_valid);
    }

    #[test]
    fn expired_range_is_invalid_but_still_parsed() {
        let (valid, window) = evaluate("01.01.2000 - 31.12.2000", at(2025, 1, 1));
        assert!(!valid);
        assert!(!window.unwrap().is_valid);
    }

    #[test]
    fn future_range_is_invalid() {
        let (valid, _) = evaluate("01.02.2025 - 08.02.2025", at(2025, 1, 1));
        assert!(!valid);
    }

    #[test]
    fn range_bounds_are_inclusive_at_day_granularity() {
        let late = NaiveDate::from_ymd_opt(2025, 3, 8)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert!(evaluate("03.03.2025 - 08.03.2025", late).0);

        let early = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        assert!(evaluate("03.03.2025 - 08.03.2025", early).0);
    }

    #[test]
    fn range_tolerates_missing_whitespace_around_dash() {
        let (valid, window) = evaluate("Gültig 03.03.2025-08.03.2025", at(2025, 3, 5));
        assert!(valid);
        assert_eq!(window.unwrap().valid_to, Some(date(2025, 3, 8)));
    }

    #[test]
    fn single_started_date_is_open_ended_valid() {
        let (valid, window) = evaluate("01.01.2025", at(2025, 6, 1));
        assert!(valid);
        let window = window.unwrap();
        assert_eq!(window.valid_from, date(2025, 1, 1));
        assert_eq!(window.valid_to, None);
    }

    #[test]
    fn single_future_date_is_invalid() {
        let (valid, window) = evaluate("ab 10.06.2025", at(2025, 6, 1));
        assert!(!valid);
        assert_eq!(window.unwrap().valid_from, date(2025, 6, 10));
    }

    #[test]
    fn text_without_dates_is_invalid_without_window() {
        let (valid, window) = evaluate("no dates here", at(2025, 1, 1));
        assert!(!valid);
        assert!(window.is_none());
    }

    #[test]
    fn impossible_calendar_date_is_invalid_without_window() {
        let (valid, window) = evaluate("31.02.2024 - 05.03.2024", at(2024, 3, 1));
        assert!(!valid);
        assert!(window.is_none());
    }
}
