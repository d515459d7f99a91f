//! Shift model.
//!
//! A shift is a time-boxed duty slot, optionally restricted to a role,
//! that one or more users may be assigned to. Shifts carry the records
//! of any assignments made before this planning run.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{day_of, TimeWindow};

/// A duty slot to be filled.
///
/// # Time Representation
/// `start` and `end` are UTC instants forming the half-open interval
/// `[start, end)`. Input validation rejects `end <= start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Role a user must hold to fill this shift. `None` = open to anyone.
    pub role_id: Option<String>,
    /// Shift start (inclusive).
    pub start: DateTime<Utc>,
    /// Shift end (exclusive).
    pub end: DateTime<Utc>,
    /// Number of simultaneous occupants (default: 1).
    #[serde(default = "default_needed")]
    pub needed: u32,
    /// Assignments recorded before this planning run.
    #[serde(default)]
    pub prior_assignments: Vec<PriorAssignment>,
}

fn default_needed() -> u32 {
    1
}

/// An assignment record that already exists for a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorAssignment {
    /// Assigned user, if any.
    pub user_id: Option<String>,
    /// Lifecycle state of the record.
    pub status: AssignmentStatus,
}

/// Lifecycle state of a persisted assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    /// Proposed, awaiting the user's answer.
    Pending,
    /// The user volunteered for the slot.
    Available,
    /// Fixed. The engine never reassigns a confirmed slot.
    Confirmed,
}

impl Shift {
    /// Creates a role-less, single-occupancy shift.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role_id: None,
            start,
            end,
            needed: 1,
            prior_assignments: Vec::new(),
        }
    }

    /// Restricts the shift to holders of a role.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Sets the number of simultaneous occupants.
    pub fn with_needed(mut self, needed: u32) -> Self {
        self.needed = needed;
        self
    }

    /// Adds a prior assignment record.
    pub fn with_prior(mut self, user_id: Option<&str>, status: AssignmentStatus) -> Self {
        self.prior_assignments.push(PriorAssignment {
            user_id: user_id.map(str::to_string),
            status,
        });
        self
    }

    /// Adds a confirmed prior assignment for `user_id`.
    pub fn with_confirmed(self, user_id: &str) -> Self {
        self.with_prior(Some(user_id), AssignmentStatus::Confirmed)
    }

    /// The shift interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Calendar date the shift belongs to, observed at `offset`.
    pub fn day(&self, offset: &FixedOffset) -> NaiveDate {
        day_of(self.start, offset)
    }

    /// Whether any prior assignment is confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.prior_assignments
            .iter()
            .any(|p| p.status == AssignmentStatus::Confirmed)
    }

    /// Users holding a confirmed prior assignment, in record order.
    pub fn confirmed_users(&self) -> impl Iterator<Item = &str> {
        self.prior_assignments
            .iter()
            .filter(|p| p.status == AssignmentStatus::Confirmed)
            .filter_map(|p| p.user_id.as_deref())
    }

    /// Slots still open after subtracting confirmed occupants.
    pub fn remaining_slots(&self) -> u32 {
        let confirmed = self.confirmed_users().count() as u32;
        self.needed.saturating_sub(confirmed)
    }
}
