//! Temporal visibility filter

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use super::bounds::{DateBounds, ISO_DATE_FORMAT};

/// An inclusive date range, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Range between two dates in either order (slider handles may cross).
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// Inclusive overlap with an artifact interval.
    pub fn overlaps(&self, bounds: &DateBounds) -> bool {
        !(bounds.end() < self.from || bounds.start() > self.to)
    }

    pub fn from_iso(&self) -> String {
        self.from.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn to_iso(&self) -> String {
        self.to.format(ISO_DATE_FORMAT).to_string()
    }

    /// Number of days covered, inclusive.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Date filter over a loaded corpus.
///
/// The extent is fixed at construction. Without any dated artifact the
/// filter is disabled: every range change is ignored and nothing is hidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemporalFilter {
    extent: Option<DateRange>,
    active: Option<DateRange>,
}

impl TemporalFilter {
    /// Build from the resolved bounds of every artifact in the corpus.
    pub fn from_bounds<'a, I>(bounds: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a DateBounds>>,
    {
        let extent = bounds.into_iter().flatten().fold(None, |acc: Option<DateRange>, b| {
            Some(match acc {
                None => DateRange {
                    from: b.start(),
                    to: b.end(),
                },
                Some(r) => DateRange {
                    from: r.from.min(b.start()),
                    to: r.to.max(b.end()),
                },
            })
        });
        if extent.is_none() {
            warn!("no artifact has a parseable date; date filtering disabled");
        }
        Self {
            extent,
            active: extent,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.extent.is_some()
    }

    /// Full date extent of the corpus.
    pub fn extent(&self) -> Option<DateRange> {
        self.extent
    }

    /// Currently active range.
    pub fn active(&self) -> Option<DateRange> {
        self.active
    }

    /// Replace the active range. Returns `false` (and changes nothing) when
    /// filtering is disabled.
    pub fn set_range(&mut self, range: DateRange) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.active = Some(range);
        true
    }

    /// Restore the active range to the full extent.
    pub fn reset(&mut self) {
        self.active = self.extent;
    }

    /// Whether an artifact with these bounds is shown. Undated artifacts
    /// are always shown.
    pub fn is_visible(&self, bounds: Option<&DateBounds>) -> bool {
        match (self.active, bounds) {
            (Some(range), Some(b)) => range.overlaps(b),
            _ => true,
        }
    }
}
