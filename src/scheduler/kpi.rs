//! Roster quality metrics (KPIs).
//!
//! Computes coverage and fairness indicators from a completed roster and
//! its input shifts.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Filled open slots / open slots |
//! | Required Fill Rate | Same, restricted to required-class roles |
//! | Unfilled Required | Open required-class slots left empty |
//! | Load Spread | Max − min new assignments among assigned users |
//! | Budget Exhausted | Whether any day stopped on its iteration budget |

use std::collections::{BTreeMap, HashMap};

use crate::config::RosterConfig;
use crate::models::{Roster, Shift};

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageKpi {
    /// Open slots across all solved days.
    pub open_slots: usize,
    /// Open slots that received an assignment.
    pub filled_slots: usize,
    /// `filled_slots / open_slots` (1.0 when nothing was open).
    pub fill_rate: f64,
    /// Open slots on required-class shifts.
    pub required_slots: usize,
    /// Required-class slots that received an assignment.
    pub required_filled: usize,
    /// Required-class slots left empty.
    pub unfilled_required: usize,
    /// New assignments per user.
    pub load_by_user: BTreeMap<String, usize>,
    /// Max − min of `load_by_user` (0 when empty).
    pub load_spread: usize,
    /// Whether any day hit its iteration budget.
    pub budget_exhausted: bool,
}

impl CoverageKpi {
    /// Computes KPIs from a roster and its input shifts.
    ///
    /// # Arguments
    /// * `roster` - The completed roster.
    /// * `shifts` - The shifts the roster was built from.
    /// * `config` - The configuration used (for the required-role set).
    pub fn calculate(roster: &Roster, shifts: &[Shift], config: &RosterConfig) -> Self {
        let by_id: HashMap<&str, &Shift> = shifts.iter().map(|s| (s.id.as_str(), s)).collect();
        let is_required = |shift: &Shift| {
            shift
                .role_id
                .as_deref()
                .is_some_and(|r| config.is_required_role(r))
        };

        let open_slots: usize = roster.days.iter().map(|d| d.slot_count).sum();
        let filled_slots = roster.assignment_count();

        let required_filled = roster
            .assignments
            .iter()
            .filter_map(|a| by_id.get(a.shift_id.as_str()).copied())
            .filter(|s| is_required(*s))
            .count();
        let unfilled_required: usize = roster
            .unfilled_required()
            .map(|g| g.open_slots as usize)
            .sum();

        let load_by_user: BTreeMap<String, usize> = roster
            .assignments_per_user()
            .into_iter()
            .map(|(id, n)| (id.to_string(), n))
            .collect();
        let load_spread = match (load_by_user.values().max(), load_by_user.values().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        let fill_rate = if open_slots == 0 {
            1.0
        } else {
            filled_slots as f64 / open_slots as f64
        };

        Self {
            open_slots,
            filled_slots,
            fill_rate,
            required_slots: required_filled + unfilled_required,
            required_filled,
            unfilled_required,
            load_by_user,
            load_spread,
            budget_exhausted: roster.budget_exhausted,
        }
    }

    /// Fraction of required-class slots filled (1.0 when none were open).
    pub fn required_fill_rate(&self) -> f64 {
        if self.required_slots == 0 {
            1.0
        } else {
            self.required_filled as f64 / self.required_slots as f64
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_unfilled_required: usize) -> bool {
        self.fill_rate >= min_fill_rate && self.unfilled_required <= max_unfilled_required
    }
}
