//! Roster (solution) model.
//!
//! A roster is the result of one planning run: proposed shift-user
//! pairings plus the positions that could not be filled. Pairings are
//! proposals only; the caller persists them as pending records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::Strategy;

/// A proposed pairing of a user with a shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Shift to fill.
    pub shift_id: String,
    /// User proposed for it.
    pub user_id: String,
}

/// An open slot left unfilled by the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Shift with the open slot.
    pub shift_id: String,
    /// Role the shift requires, if any.
    pub role_id: Option<String>,
    /// Day the shift was solved in.
    pub day: NaiveDate,
    /// Number of slots left open on this shift.
    pub open_slots: u32,
    /// Whether the shift's role is in the required-role set.
    pub required: bool,
    /// Whether any user was eligible at all.
    pub had_candidates: bool,
}

/// Search statistics for one solved day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Calendar day.
    pub day: NaiveDate,
    /// Open shifts on the day.
    pub shift_count: usize,
    /// Open slots across those shifts.
    pub slot_count: usize,
    /// Slots filled by the best assignment found.
    pub filled_count: usize,
    /// Search nodes visited.
    pub iterations: u64,
    /// Score of the best assignment found.
    pub score: i64,
    /// Whether the iteration budget cut the search short.
    pub exhausted: bool,
}

/// The result of one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Proposed pairings, grouped by day in chronological order.
    pub assignments: Vec<Assignment>,
    /// Slots left open.
    pub gaps: Vec<Gap>,
    /// Per-day search statistics, in chronological order.
    pub days: Vec<DaySummary>,
    /// Whether any day hit its iteration budget.
    pub budget_exhausted: bool,
    /// Strategy that produced the roster.
    #[serde(default)]
    pub strategy: Strategy,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(shift_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            shift_id: shift_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Adds a gap.
    pub fn add_gap(&mut self, gap: Gap) {
        self.gaps.push(gap);
    }

    /// Records a solved day.
    pub fn add_day(&mut self, summary: DaySummary) {
        self.budget_exhausted |= summary.exhausted;
        self.days.push(summary);
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every open slot was filled.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Users assigned to a shift.
    pub fn users_for_shift(&self, shift_id: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.shift_id == shift_id)
            .map(|a| a.user_id.as_str())
            .collect()
    }

    /// Shifts assigned to a user.
    pub fn shifts_for_user(&self, user_id: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.shift_id.as_str())
            .collect()
    }

    /// Number of new assignments per user.
    pub fn assignments_per_user(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for a in &self.assignments {
            *counts.entry(a.user_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Gaps on shifts whose role is required-class.
    pub fn unfilled_required(&self) -> impl Iterator<Item = &Gap> {
        self.gaps.iter().filter(|g| g.required)
    }

    /// Consumes the roster, keeping only the pairings.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}
