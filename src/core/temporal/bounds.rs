//! Date bounds resolution

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::core::error::FieldDecodeError;
use crate::core::models::{DateFields, RawDate};

/// Canonical date rendering
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar-date formats tried in order after ISO and RFC 3339
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// Timestamp formats without an offset; the date part is taken as-is
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

lazy_static! {
    static ref YEAR_MONTH: Regex = Regex::new(r"^(\d{4})-(\d{1,2})$").unwrap();
    static ref YEAR_ONLY: Regex = Regex::new(r"^(\d{4})$").unwrap();
}

/// Parse date text to a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (UTC date), naive timestamps,
/// `YYYY/MM/DD`, `3 February 1925`, `February 3, 1925`, and the partial
/// forms `YYYY-MM` and `YYYY` (first day of the period).
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate, FieldDecodeError> {
    let t = text.trim();
    let unparseable = || FieldDecodeError::UnparseableDate {
        field: field.to_string(),
        raw: text.to_string(),
    };
    if t.is_empty() {
        return Err(unparseable());
    }

    if let Ok(date) = NaiveDate::parse_from_str(t, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(t) {
        return Ok(stamp.with_timezone(&Utc).date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(t, format) {
            return Ok(stamp.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(t, format) {
            return Ok(date);
        }
    }
    if let Some(caps) = YEAR_MONTH.captures(t) {
        let year: i32 = caps[1].parse().map_err(|_| unparseable())?;
        let month: u32 = caps[2].parse().map_err(|_| unparseable())?;
        return NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(unparseable);
    }
    if let Some(caps) = YEAR_ONLY.captures(t) {
        let year: i32 = caps[1].parse().map_err(|_| unparseable())?;
        return NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(unparseable);
    }
    Err(unparseable())
}

/// A resolved, inclusive date interval. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateBounds {
    /// Interval from `start` to `end`; `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// One-day interval.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_iso(&self) -> String {
        self.start.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format(ISO_DATE_FORMAT).to_string()
    }
}

fn first_parsed(dates: &[RawDate]) -> Option<NaiveDate> {
    dates.iter().find_map(|raw| match parse_date(&raw.field, &raw.text) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("{}", err);
            None
        }
    })
}

/// Resolve an artifact's date interval, or `None` if it is undated.
///
/// An inverted interval is rejected, not swapped; resolution then falls
/// through to the single-date aliases.
pub fn resolve_bounds(dates: &DateFields) -> Option<DateBounds> {
    if let (Some(start), Some(end)) = (first_parsed(&dates.start), first_parsed(&dates.end)) {
        match DateBounds::new(start, end) {
            Some(bounds) => return Some(bounds),
            None => debug!("rejecting inverted interval {} .. {}", start, end),
        }
    }
    first_parsed(&dates.single).map(DateBounds::single)
}
