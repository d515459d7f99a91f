//! Cross-day state: busy intervals and load counters.
//!
//! Both structures only ever grow during a run. They are seeded from
//! confirmed prior assignments and extended after each day is solved,
//! so a later day sees every commitment made on earlier days.

use std::collections::HashMap;

use crate::models::TimeWindow;

/// Per-user record of occupied intervals.
#[derive(Debug, Clone, Default)]
pub struct BusyMap {
    intervals: HashMap<String, Vec<TimeWindow>>,
}

impl BusyMap {
    /// Creates an empty busy map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `user_id` as occupied during `window`.
    pub fn mark(&mut self, user_id: &str, window: TimeWindow) {
        self.intervals
            .entry(user_id.to_string())
            .or_default()
            .push(window);
    }

    /// Whether any recorded interval of `user_id` overlaps `window`.
    pub fn is_busy(&self, user_id: &str, window: &TimeWindow) -> bool {
        self.intervals(user_id).iter().any(|w| w.overlaps(window))
    }

    /// Recorded intervals of a user.
    pub fn intervals(&self, user_id: &str) -> &[TimeWindow] {
        self.intervals
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Running count of assignments per user.
#[derive(Debug, Clone, Default)]
pub struct LoadCounters {
    counts: HashMap<String, u32>,
}

impl LoadCounters {
    /// Creates empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load of a user (0 if never assigned).
    pub fn get(&self, user_id: &str) -> u32 {
        self.counts.get(user_id).copied().unwrap_or(0)
    }

    /// Adds one to a user's load.
    pub fn increment(&mut self, user_id: &str) {
        *self.counts.entry(user_id.to_string()).or_insert(0) += 1;
    }

    /// All non-zero loads.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(id, &n)| (id.as_str(), n))
    }

    /// Sum of all loads.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&n| u64::from(n)).sum()
    }
}

/// The state threaded from one day to the next.
#[derive(Debug, Clone, Default)]
pub struct CarryForward {
    /// Committed intervals per user.
    pub busy: BusyMap,
    /// Committed assignment counts per user.
    pub loads: LoadCounters,
}

impl CarryForward {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits one assignment: the user becomes busy for `window` and its
    /// load grows by one.
    pub fn commit(&mut self, user_id: &str, window: TimeWindow) {
        self.busy.mark(user_id, window);
        self.loads.increment(user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_busy_map() {
        let mut busy = BusyMap::new();
        busy.mark("u1", TimeWindow::new(at(10), at(11)));

        assert!(busy.is_busy("u1", &TimeWindow::new(at(10), at(12))));
        assert!(!busy.is_busy("u1", &TimeWindow::new(at(11), at(12))));
        assert!(!busy.is_busy("u2", &TimeWindow::new(at(10), at(11))));
        assert_eq!(busy.intervals("u1").len(), 1);
        assert!(busy.intervals("u2").is_empty());
    }

    #[test]
    fn test_load_counters() {
        let mut loads = LoadCounters::new();
        assert_eq!(loads.get("u1"), 0);
        loads.increment("u1");
        loads.increment("u1");
        loads.increment("u2");
        assert_eq!(loads.get("u1"), 2);
        assert_eq!(loads.get("u2"), 1);
        assert_eq!(loads.total(), 3);
        assert_eq!(loads.iter().count(), 2);
    }

    #[test]
    fn test_commit_is_additive() {
        let mut carry = CarryForward::new();
        carry.commit("u1", TimeWindow::new(at(10), at(11)));
        carry.commit("u1", TimeWindow::new(at(13), at(14)));

        assert_eq!(carry.loads.get("u1"), 2);
        assert_eq!(carry.busy.intervals("u1").len(), 2);
        assert!(carry.busy.is_busy("u1", &TimeWindow::new(at(13), at(15))));
    }
}
