//! Time interval model and overlap testing.
//!
//! # Time Model
//! All instants are UTC (`chrono::DateTime<Utc>`). Calendar days are
//! derived by shifting an instant into a fixed UTC offset and truncating
//! to the date; the consumer decides which offset defines "a day".
//!
//! # Interval Semantics
//! Intervals are half-open `[start, end)`: a shift ending at 11:00 does
//! not conflict with one starting at 11:00.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect.
///
/// Symmetric and side-effect free.
#[inline]
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether two windows overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Whether `end > start`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }
}

/// Calendar date of an instant, observed at `offset`.
pub fn day_of(at: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    at.with_timezone(offset).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_overlaps_basic() {
        assert!(overlaps(0, 10, 5, 15));
        assert!(overlaps(5, 15, 0, 10));
        assert!(overlaps(0, 10, 2, 3));
        assert!(!overlaps(0, 10, 10, 20));
        assert!(!overlaps(10, 20, 0, 10));
    }

    #[test]
    fn test_window_overlap_is_symmetric() {
        let a = TimeWindow::new(at(10, 0), at(11, 0));
        let b = TimeWindow::new(at(10, 30), at(11, 30));
        let c = TimeWindow::new(at(11, 0), at(12, 0));
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_window_well_formed() {
        let w = TimeWindow::new(at(10, 0), at(11, 0));
        assert!(w.is_well_formed());
        assert!(!TimeWindow::new(at(11, 0), at(10, 0)).is_well_formed());
        assert!(!TimeWindow::new(at(11, 0), at(11, 0)).is_well_formed());
    }

    #[test]
    fn test_day_respects_offset() {
        let w = TimeWindow::new(at(23, 0), at(23, 30));
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_of(w.start, &utc), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(day_of(w.start, &plus2), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }
}
