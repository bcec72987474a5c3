//! # Date Parsing
//!
//! Best-effort parser for the date formats people commonly write in free text.
//!
//! | Shape                 | Example                  |
//! |-----------------------|--------------------------|
//! | `M/D/YYYY`, `M/D/YY`  | `2/11/2015`, `3/12/21`   |
//! | `YYYY-MM-DD`          | `2015-02-11`             |
//! | `YYYY/MM/DD`          | `2015/02/11`             |
//! | `M-D-YYYY`            | `2-11-2015`              |
//! | `D.M.YYYY`            | `11.02.2015`             |
//! | `YYYY.MM.DD`          | `2015.02.11`             |
//! | `D-Mon-YYYY`          | `11-Feb-2015`            |
//! | ISO date-time         | `2015-02-11T08:30:00`    |
//! | RFC 3339              | `2015-02-11T08:30:00Z`   |
//!
//! Slash and dash dates are read month-first. Values without an explicit
//! offset are taken as UTC and every result is converted to UTC; there is no
//! attempt to guess the writer's local timezone.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Rejects tokens that cannot be a date before any format is tried.
static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^(?:
            \d{1,4}[/.-]\d{1,2}[/.-]\d{2,4}            # numeric day, month and year
          | \d{1,2}-[A-Za-z]{3}-\d{4}                  # 11-Feb-2015
          | \d{4}-\d{2}-\d{2}T[0-9:.]+(?:Z|[+-][0-9:]+)?  # ISO / RFC 3339
        )$",
    )
    .expect("date shape regex is valid")
});

/// Date-only formats, in the order they are tried. Two-digit year formats
/// come first because `%Y` also accepts a two-digit year.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m-%d-%y",
    "%d.%m.%y",
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
    "%d-%b-%Y",
];

/// `%Y` reads any number of digits; years below this are a misread field.
const MIN_YEAR: i32 = 1000;

/// Date-time formats without an offset.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses `token` as a date or date-time, normalized to UTC.
pub fn parse_date(token: &str) -> Option<DateTime<Utc>> {
    if !DATE_SHAPE.is_match(token) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
                .find(|date| date.year() >= MIN_YEAR)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Formats a parsed date the way it appears in an entity value (`2015-02-11 00:00:00 UTC`).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_string()
}
