//! Roster engine.
//!
//! # Algorithm
//!
//! 1. Validate configuration and input (fail fast, nothing is solved on
//!    malformed data).
//! 2. Partition shifts by calendar day, seeding busy intervals and loads
//!    from confirmed prior assignments.
//! 3. For each day in chronological order, solve with the configured
//!    strategy, then commit every chosen pair to the carry-forward state
//!    so later days see it.
//! 4. Record per-day statistics and every slot left open.
//!
//! Days are solved independently. The only coupling is the carry-forward
//! state, which grows monotonically.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::day_solver::{solve_day, DaySolution};
use super::greedy::solve_day_greedy;
use super::partition::{partition_by_day, DayGroup, Partition};
use super::score::Scorer;
use crate::config::{RosterConfig, Strategy};
use crate::error::RosterError;
use crate::models::{Assignment, DaySummary, Gap, Roster, Shift, User};
use crate::validation::validate_input;

/// Assigns users to shifts with the default configuration.
///
/// Shorthand for `RosterScheduler::new().assign(shifts, users)`.
pub fn assign(shifts: &[Shift], users: &[User]) -> Result<Vec<Assignment>, RosterError> {
    RosterScheduler::new().assign(shifts, users)
}

/// Day-by-day roster scheduler.
///
/// # Usage
/// ```
/// use u_roster::models::{Shift, User};
/// use u_roster::scheduler::RosterScheduler;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 12, 7, 10, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 12, 7, 12, 0, 0).unwrap();
/// let shifts = vec![Shift::new("s1", start, end).with_role("guitar")];
/// let users = vec![User::new("u1").with_required_role("guitar")];
///
/// let roster = RosterScheduler::new().schedule(&shifts, &users).unwrap();
/// assert_eq!(roster.assignment_count(), 1);
/// assert!(roster.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterScheduler {
    config: RosterConfig,
}

impl RosterScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: RosterConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Runs one planning pass and returns the assignment pairs only.
    pub fn assign(&self, shifts: &[Shift], users: &[User]) -> Result<Vec<Assignment>, RosterError> {
        self.schedule(shifts, users).map(Roster::into_assignments)
    }

    /// Runs one planning pass.
    ///
    /// # Errors
    /// - [`RosterError::Config`] if the configuration is out of range.
    /// - [`RosterError::Validation`] if shifts or users are malformed.
    ///
    /// Empty input yields an empty roster. An exhausted iteration budget
    /// is reported on the roster, not as an error.
    pub fn schedule(&self, shifts: &[Shift], users: &[User]) -> Result<Roster, RosterError> {
        self.config.validate()?;
        let offset = self.config.day_offset()?;
        validate_input(shifts, users)?;

        info!(
            event = "roster_start",
            shifts = shifts.len(),
            users = users.len(),
            strategy = ?self.config.strategy,
            "Starting roster run"
        );

        let scorer = Scorer::from_config(&self.config);
        let Partition {
            days,
            mut carry,
            confirmed_shifts,
        } = partition_by_day(shifts, &offset, self.config.fill_partially_confirmed);

        let mut roster = Roster::new();
        roster.strategy = self.config.strategy;

        for group in &days {
            let solution = match self.config.strategy {
                Strategy::Backtracking => solve_day(
                    group,
                    shifts,
                    users,
                    &carry,
                    &scorer,
                    self.config.max_iterations,
                ),
                Strategy::Greedy => solve_day_greedy(group, shifts, users, &carry, &scorer),
            };

            for &(s, u) in &solution.assignments {
                let (shift, user) = (&shifts[s], &users[u]);
                carry.commit(&user.id, shift.window());
                roster.add_assignment(Assignment::new(shift.id.as_str(), user.id.as_str()));
            }
            self.record_gaps(&mut roster, group, shifts, &solution, &scorer);

            if solution.exhausted {
                warn!(
                    day = %group.day,
                    iterations = solution.iterations,
                    max_iterations = self.config.max_iterations,
                    "Iteration budget exhausted, keeping best assignment found"
                );
            }
            debug!(
                day = %group.day,
                shifts = group.shifts.len(),
                slots = group.slot_count(),
                filled = solution.assignments.len(),
                iterations = solution.iterations,
                score = solution.score,
                "Solved day"
            );

            roster.add_day(DaySummary {
                day: group.day,
                shift_count: group.shifts.len(),
                slot_count: group.slot_count(),
                filled_count: solution.assignments.len(),
                iterations: solution.iterations,
                score: solution.score,
                exhausted: solution.exhausted,
            });
        }

        info!(
            event = "roster_end",
            days = roster.days.len(),
            confirmed_shifts,
            assignments = roster.assignment_count(),
            total_load = carry.loads.total(),
            gaps = roster.gaps.len(),
            budget_exhausted = roster.budget_exhausted,
            "Finished roster run"
        );

        Ok(roster)
    }

    fn record_gaps(
        &self,
        roster: &mut Roster,
        group: &DayGroup,
        shifts: &[Shift],
        solution: &DaySolution,
        scorer: &Scorer<'_>,
    ) {
        let mut filled: BTreeMap<usize, u32> = BTreeMap::new();
        for &(s, _) in &solution.assignments {
            *filled.entry(s).or_insert(0) += 1;
        }

        for (open, &candidates) in group.shifts.iter().zip(&solution.candidate_counts) {
            let remaining = open
                .open_slots
                .saturating_sub(filled.get(&open.index).copied().unwrap_or(0));
            if remaining == 0 {
                continue;
            }
            let shift = &shifts[open.index];
            roster.add_gap(Gap {
                shift_id: shift.id.clone(),
                role_id: shift.role_id.clone(),
                day: group.day,
                open_slots: remaining,
                required: scorer.is_required_shift(shift),
                had_candidates: candidates > 0,
            });
        }
    }
}
