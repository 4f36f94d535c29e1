//! Temporal Module - Date Filtering
//!
//! Resolves each artifact's excavation date interval from its date aliases
//! and tests it against the active range of the date slider.
//!
//! # Resolution Order
//!
//! 1. **Interval**: first parseable start alias paired with first parseable
//!    end alias, accepted only when start <= end
//! 2. **Single date**: first parseable single-date alias, as a one-day interval
//! 3. **Undated**: no bounds; always visible
//!
//! When no artifact in the corpus is dated the filter is disabled and never
//! hides anything.

mod bounds;
mod filter;

pub use bounds::{parse_date, resolve_bounds, DateBounds, ISO_DATE_FORMAT};
pub use filter::{DateRange, TemporalFilter};
