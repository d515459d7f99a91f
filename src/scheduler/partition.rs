//! Day partitioning.
//!
//! # Algorithm
//!
//! 1. For every shift with confirmed prior assignments, commit each
//!    confirmed user (busy for the shift interval, load + 1).
//! 2. Drop confirmed shifts from the search, unless partial filling is
//!    enabled and confirmed users leave some of `needed` open.
//! 3. Bucket the remaining shifts by calendar day, preserving input order
//!    within a day; days come out in chronological order.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};

use super::load::CarryForward;
use crate::models::Shift;

/// A shift that still has open slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenShift {
    /// Index into the input shift slice.
    pub index: usize,
    /// Slots to fill.
    pub open_slots: u32,
}

/// The open shifts of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// Calendar day.
    pub day: NaiveDate,
    /// Open shifts, in input order.
    pub shifts: Vec<OpenShift>,
}

impl DayGroup {
    /// Total open slots on the day.
    pub fn slot_count(&self) -> usize {
        self.shifts.iter().map(|s| s.open_slots as usize).sum()
    }
}

/// Output of partitioning.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Day groups in chronological order.
    pub days: Vec<DayGroup>,
    /// State seeded from confirmed prior assignments.
    pub carry: CarryForward,
    /// Number of shifts removed because they are confirmed.
    pub confirmed_shifts: usize,
}

/// Splits shifts into per-day groups and seeds the carry-forward state.
pub fn partition_by_day(
    shifts: &[Shift],
    offset: &FixedOffset,
    fill_partially_confirmed: bool,
) -> Partition {
    let mut carry = CarryForward::new();
    let mut buckets: BTreeMap<NaiveDate, Vec<OpenShift>> = BTreeMap::new();
    let mut confirmed_shifts = 0;

    for (index, shift) in shifts.iter().enumerate() {
        let open_slots = if shift.is_confirmed() {
            for user_id in shift.confirmed_users() {
                carry.commit(user_id, shift.window());
            }
            if fill_partially_confirmed {
                shift.remaining_slots()
            } else {
                0
            }
        } else {
            shift.needed
        };

        if shift.is_confirmed() && open_slots == 0 {
            confirmed_shifts += 1;
            continue;
        }
        if open_slots == 0 {
            continue;
        }

        buckets
            .entry(shift.day(offset))
            .or_default()
            .push(OpenShift { index, open_slots });
    }

    Partition {
        days: buckets
            .into_iter()
            .map(|(day, shifts)| DayGroup { day, shifts })
            .collect(),
        carry,
        confirmed_shifts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, TimeWindow};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, d, h, 0, 0).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_days_sorted_chronologically() {
        let shifts = vec![
            Shift::new("late", at(14, 12), at(14, 13)),
            Shift::new("early", at(7, 12), at(7, 13)),
            Shift::new("late-2", at(14, 9), at(14, 10)),
        ];
        let p = partition_by_day(&shifts, &utc(), false);

        assert_eq!(p.days.len(), 2);
        assert_eq!(p.days[0].day, NaiveDate::from_ymd_opt(2025, 12, 7).unwrap());
        assert_eq!(p.days[1].day, NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
        let late: Vec<usize> = p.days[1].shifts.iter().map(|s| s.index).collect();
        assert_eq!(late, vec![0, 2]);
    }

    #[test]
    fn test_confirmed_shift_seeds_state() {
        let shifts = vec![
            Shift::new("s1", at(7, 12), at(7, 13)).with_confirmed("u1"),
            Shift::new("s2", at(7, 12), at(7, 13))
                .with_prior(Some("u2"), AssignmentStatus::Pending),
        ];
        let p = partition_by_day(&shifts, &utc(), false);

        assert_eq!(p.confirmed_shifts, 1);
        assert_eq!(p.days.len(), 1);
        assert_eq!(p.days[0].shifts, vec![OpenShift { index: 1, open_slots: 1 }]);
        assert_eq!(p.carry.loads.get("u1"), 1);
        assert_eq!(p.carry.loads.get("u2"), 0);
        assert!(p
            .carry
            .busy
            .is_busy("u1", &TimeWindow::new(at(7, 12), at(7, 13))));
    }

    #[test]
    fn test_confirmed_without_user_still_resolves_shift() {
        let shifts = vec![
            Shift::new("s1", at(7, 12), at(7, 13)).with_prior(None, AssignmentStatus::Confirmed)
        ];
        let p = partition_by_day(&shifts, &utc(), false);
        assert!(p.days.is_empty());
        assert_eq!(p.confirmed_shifts, 1);
        assert_eq!(p.carry.loads.total(), 0);
    }

    #[test]
    fn test_partial_fill_keeps_remaining_slots() {
        let shifts = vec![Shift::new("s1", at(7, 12), at(7, 13))
            .with_needed(3)
            .with_confirmed("u1")];

        let strict = partition_by_day(&shifts, &utc(), false);
        assert!(strict.days.is_empty());

        let partial = partition_by_day(&shifts, &utc(), true);
        assert_eq!(partial.days[0].shifts[0].open_slots, 2);
        assert_eq!(partial.days[0].slot_count(), 2);
        assert_eq!(partial.carry.loads.get("u1"), 1);
    }

    #[test]
    fn test_zero_needed_is_skipped() {
        let shifts = vec![Shift::new("s1", at(7, 12), at(7, 13)).with_needed(0)];
        let p = partition_by_day(&shifts, &utc(), false);
        assert!(p.days.is_empty());
        assert_eq!(p.confirmed_shifts, 0);
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        let shifts = vec![Shift::new("s1", at(7, 23), at(8, 1))];
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        let p = partition_by_day(&shifts, &plus2, false);
        assert_eq!(p.days[0].day, NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
    }

    #[test]
    fn test_empty() {
        let p = partition_by_day(&[], &utc(), false);
        assert!(p.days.is_empty());
        assert_eq!(p.carry.loads.total(), 0);
    }
}
