//! Day expression parsing
//!
//! Turns what the user typed for `--day` ("today", "fri", "01/02", ...) into a
//! calendar date relative to the invocation date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

/// Human-readable list of the accepted day forms
pub const SUPPORTED_FORMATS: &str = "\
- Today         (For today)
- Tomorrow      (For tomorrow)
- Yesterday     (For yesterday)
- Fri           (For this week's friday)
- Friday
- 01/01         (For the first of January of this year)
- 01/01/01      (For the first of January of 2001)
- 01/01/1901    (For the first of January of 1901)

The formats are case insensitive.";

/// Errors that can occur when resolving a day expression
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    /// The input matched none of the supported forms
    #[error("Invalid date format: '{}'. Available formats are:\n\n{}", .input, SUPPORTED_FORMATS)]
    InvalidFormat { input: String },
}

/// Weekday names, abbreviated and full, indexed from Monday
const WEEKDAYS: [(Weekday, &str, &str); 7] = [
    (Weekday::Mon, "mon", "monday"),
    (Weekday::Tue, "tue", "tuesday"),
    (Weekday::Wed, "wed", "wednesday"),
    (Weekday::Thu, "thu", "thursday"),
    (Weekday::Fri, "fri", "friday"),
    (Weekday::Sat, "sat", "saturday"),
    (Weekday::Sun, "sun", "sunday"),
];

/// Candidate formats, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayFormat {
    /// `Fri`, within the current week
    WeekdayAbbreviated,
    /// `Friday`, within the current week
    WeekdayFull,
    /// `dd/mm`, within the current year
    DayMonth,
    /// `dd/mm/yy`
    DayMonthShortYear,
    /// `dd/mm/yyyy`
    DayMonthYear,
}

const CANDIDATES: [DayFormat; 5] = [
    DayFormat::WeekdayAbbreviated,
    DayFormat::WeekdayFull,
    DayFormat::DayMonth,
    DayFormat::DayMonthShortYear,
    DayFormat::DayMonthYear,
];

/// Resolves a day expression relative to `today`
///
/// # Arguments
/// * `input` - The expression typed by the user
/// * `today` - The invocation date
///
/// # Returns
/// * `Ok(NaiveDate)` for the first candidate form that parses
/// * `Err(DateError::InvalidFormat)` if no form matches
///
/// Weekday names resolve within the Monday-based week containing `today`, so
/// "monday" asked on a Wednesday is two days in the past. Numeric dates are day-first.
pub fn resolve_day(input: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let day = input.trim().to_lowercase();

    match day.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    for format in CANDIDATES {
        match parse_with_format(&day, format, today) {
            Some(date) => {
                tracing::debug!(?format, %date, "day parsed");
                return Ok(date);
            }
            None => tracing::trace!(?format, "parse attempt failed"),
        }
    }

    Err(DateError::InvalidFormat {
        input: input.to_string(),
    })
}

fn parse_with_format(day: &str, format: DayFormat, today: NaiveDate) -> Option<NaiveDate> {
    match format {
        DayFormat::WeekdayAbbreviated => WEEKDAYS
            .iter()
            .find(|(_, abbreviated, _)| *abbreviated == day)
            .map(|(weekday, _, _)| weekday_in_week_of(*weekday, today)),
        DayFormat::WeekdayFull => WEEKDAYS
            .iter()
            .find(|(_, _, full)| *full == day)
            .map(|(weekday, _, _)| weekday_in_week_of(*weekday, today)),
        DayFormat::DayMonth => match numeric_fields(day, None)? {
            (d, m, None) => NaiveDate::from_ymd_opt(today.year(), m, d),
            _ => None,
        },
        DayFormat::DayMonthShortYear => match numeric_fields(day, Some(2))? {
            (d, m, Some(yy)) => {
                // Two-digit years 69-99 are 19xx, 00-68 are 20xx.
                let year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
                NaiveDate::from_ymd_opt(year as i32, m, d)
            }
            _ => None,
        },
        DayFormat::DayMonthYear => match numeric_fields(day, Some(4))? {
            (d, m, Some(year)) => NaiveDate::from_ymd_opt(year as i32, m, d),
            _ => None,
        },
    }
}

/// Splits `d/m[/y]` into numbers, checking each field's literal digit count
///
/// Day and month take one or two ASCII digits. The year is present only when
/// `year_digits` is given and must have exactly that many digits.
fn numeric_fields(day: &str, year_digits: Option<usize>) -> Option<(u32, u32, Option<u32>)> {
    let fields: Vec<&str> = day.split('/').collect();
    let digits = |field: &str, min: usize, max: usize| -> Option<u32> {
        if !(min..=max).contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        field.parse().ok()
    };

    match (fields.as_slice(), year_digits) {
        ([d, m], None) => Some((digits(*d, 1, 2)?, digits(*m, 1, 2)?, None)),
        ([d, m, y], Some(n)) => Some((
            digits(*d, 1, 2)?,
            digits(*m, 1, 2)?,
            Some(digits(*y, n, n)?),
        )),
        _ => None,
    }
}

/// The date of `weekday` in the Monday-based week containing `date`
pub fn weekday_in_week_of(weekday: Weekday, date: NaiveDate) -> NaiveDate {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    monday + Duration::days(i64::from(weekday.num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A Wednesday
    fn today() -> NaiveDate {
        date(2026, 10, 14)
    }

    #[test]
    fn test_keywords() {
        assert_eq!(resolve_day("today", today()), Ok(today()));
        assert_eq!(resolve_day("tomorrow", today()), Ok(date(2026, 10, 15)));
        assert_eq!(resolve_day("yesterday", today()), Ok(date(2026, 10, 13)));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(resolve_day("Today", today()), Ok(today()));
        assert_eq!(resolve_day("TOMORROW", today()), Ok(date(2026, 10, 15)));
        assert_eq!(resolve_day(" Yesterday ", today()), Ok(date(2026, 10, 13)));
    }

    #[test]
    fn test_tomorrow_crosses_year() {
        assert_eq!(resolve_day("tomorrow", date(2026, 12, 31)), Ok(date(2027, 1, 1)));
    }

    #[test]
    fn test_abbreviated_weekday_resolves_in_current_week() {
        assert_eq!(resolve_day("fri", today()), Ok(date(2026, 10, 16)));
        assert_eq!(resolve_day("Fri", today()), Ok(date(2026, 10, 16)));
        assert_eq!(resolve_day("wed", today()), Ok(today()));
    }

    #[test]
    fn test_full_weekday_resolves_in_current_week() {
        assert_eq!(resolve_day("Friday", today()), Ok(date(2026, 10, 16)));
        assert_eq!(resolve_day("SUNDAY", today()), Ok(date(2026, 10, 18)));
    }

    #[test]
    fn test_earlier_weekday_stays_in_current_week() {
        // Monday asked on a Wednesday is in the past, not next week.
        assert_eq!(resolve_day("monday", today()), Ok(date(2026, 10, 12)));
        assert_eq!(resolve_day("mon", today()), Ok(date(2026, 10, 12)));
    }

    #[test]
    fn test_weekday_from_sunday_looks_back() {
        let sunday = date(2026, 10, 18);
        assert_eq!(resolve_day("fri", sunday), Ok(date(2026, 10, 16)));
    }

    #[test]
    fn test_day_month_uses_current_year() {
        assert_eq!(resolve_day("01/02", today()), Ok(date(2026, 2, 1)));
        assert_eq!(resolve_day("25/12", today()), Ok(date(2026, 12, 25)));
    }

    #[test]
    fn test_day_month_short_year() {
        assert_eq!(resolve_day("01/02/24", today()), Ok(date(2024, 2, 1)));
        assert_eq!(resolve_day("01/01/01", today()), Ok(date(2001, 1, 1)));
    }

    #[test]
    fn test_short_year_century_pivot() {
        assert_eq!(resolve_day("01/02/68", today()), Ok(date(2068, 2, 1)));
        assert_eq!(resolve_day("01/02/69", today()), Ok(date(1969, 2, 1)));
        assert_eq!(resolve_day("31/12/99", today()), Ok(date(1999, 12, 31)));
        assert_eq!(resolve_day("01/02/00", today()), Ok(date(2000, 2, 1)));
    }

    #[test]
    fn test_single_digit_day_and_month() {
        assert_eq!(resolve_day("1/2", today()), Ok(date(2026, 2, 1)));
        assert_eq!(resolve_day("1/2/2024", today()), Ok(date(2024, 2, 1)));
    }

    #[test]
    fn test_fields_must_match_their_literal_form() {
        assert!(resolve_day("01/02/024", today()).is_err());
        assert!(resolve_day("01/02/02024", today()).is_err());
        assert!(resolve_day("01/02/2", today()).is_err());
        assert!(resolve_day(" 01/ 02", today()).is_err());
        assert!(resolve_day("01 /02", today()).is_err());
        assert!(resolve_day("001/02", today()).is_err());
        assert!(resolve_day("+1/02", today()).is_err());
        assert!(resolve_day("01/02/", today()).is_err());
        assert!(resolve_day("01//02", today()).is_err());
    }

    #[test]
    fn test_day_month_full_year() {
        assert_eq!(resolve_day("01/02/2024", today()), Ok(date(2024, 2, 1)));
        assert_eq!(resolve_day("01/01/1901", today()), Ok(date(1901, 1, 1)));
    }

    #[test]
    fn test_impossible_dates_are_rejected() {
        assert!(resolve_day("31/02", today()).is_err());
        assert!(resolve_day("29/02/2023", today()).is_err());
        assert!(resolve_day("00/01/2024", today()).is_err());
        assert!(resolve_day("01/13/2024", today()).is_err());
    }

    #[test]
    fn test_invalid_input_lists_supported_formats() {
        let err = resolve_day("next week", today()).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidFormat {
                input: "next week".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.contains("next week"));
        assert!(message.contains("Friday"));
        assert!(message.contains("01/01/1901"));
    }

    #[test]
    fn test_partial_weekday_names_are_rejected() {
        assert!(resolve_day("fr", today()).is_err());
        assert!(resolve_day("frid", today()).is_err());
        assert!(resolve_day("", today()).is_err());
    }

    #[test]
    fn test_weekday_in_week_of() {
        assert_eq!(weekday_in_week_of(Weekday::Mon, today()), date(2026, 10, 12));
        assert_eq!(weekday_in_week_of(Weekday::Sun, today()), date(2026, 10, 18));
        // Week spanning the new year.
        assert_eq!(weekday_in_week_of(Weekday::Mon, date(2027, 1, 1)), date(2026, 12, 28));
    }
}
