//! Assignment scoring.
//!
//! # Score
//!
//! For a candidate assignment set of one day:
//!
//! ```text
//! score = Σ_assignments ( coverage
//!                       + (required_coverage | optional_coverage)
//!                       + role_affinity · [user is primary holder] )
//!       − fairness · Σ_users total_load²
//! ```
//!
//! where `total_load` is the carried-in load plus the set's own
//! assignments. Weights come from [`ScoreWeights`]; the defaults make
//! coverage dominate required-class coverage, which dominates role
//! affinity, which dominates fairness.
//!
//! The search evaluates the score incrementally: [`Scorer::assignment_value`]
//! is added on push and the fairness term grows by
//! [`Scorer::marginal_fairness`]. [`Scorer::score`] is the full evaluation
//! and agrees with the incremental sum exactly.

use std::collections::{BTreeSet, HashMap};

use super::eligibility::role_type_for;
use super::load::LoadCounters;
use crate::config::{RosterConfig, ScoreWeights};
use crate::models::{RoleType, Shift, User};

/// Evaluates assignment sets.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    weights: &'a ScoreWeights,
    required_roles: &'a BTreeSet<String>,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer from explicit weights and required roles.
    pub fn new(weights: &'a ScoreWeights, required_roles: &'a BTreeSet<String>) -> Self {
        Self {
            weights,
            required_roles,
        }
    }

    /// Creates a scorer from a configuration.
    pub fn from_config(config: &'a RosterConfig) -> Self {
        Self::new(&config.weights, &config.required_roles)
    }

    /// Whether the shift's role is required-class.
    pub fn is_required_shift(&self, shift: &Shift) -> bool {
        shift
            .role_id
            .as_deref()
            .is_some_and(|role| self.required_roles.contains(role))
    }

    /// Load-independent value of assigning `user` to `shift`.
    pub fn assignment_value(&self, shift: &Shift, user: &User) -> i64 {
        let class = if self.is_required_shift(shift) {
            self.weights.required_coverage
        } else {
            self.weights.optional_coverage
        };
        let affinity = match role_type_for(shift, user) {
            Some(RoleType::Required) => self.weights.role_affinity,
            _ => 0,
        };
        self.weights.coverage + class + affinity
    }

    /// Fairness penalty of a single user's total load.
    #[inline]
    pub fn fairness_penalty(&self, load: u32) -> i64 {
        let load = i64::from(load);
        self.weights.fairness * load * load
    }

    /// Penalty increase when a user's load goes from `load` to `load + 1`.
    #[inline]
    pub fn marginal_fairness(&self, load: u32) -> i64 {
        self.weights.fairness * (2 * i64::from(load) + 1)
    }

    /// Fairness penalty of the carried-in loads alone.
    pub fn base_penalty(&self, base_loads: &LoadCounters) -> i64 {
        base_loads
            .iter()
            .map(|(_, load)| self.fairness_penalty(load))
            .sum()
    }

    /// Full score of an assignment set on top of `base_loads`.
    pub fn score(&self, assignments: &[(&Shift, &User)], base_loads: &LoadCounters) -> i64 {
        let mut loads: HashMap<&str, u32> = base_loads.iter().collect();
        let mut score = 0;

        for (shift, user) in assignments {
            score += self.assignment_value(shift, user);
            *loads.entry(user.id.as_str()).or_insert(0) += 1;
        }

        score
            - loads
                .values()
                .map(|&load| self.fairness_penalty(load))
                .sum::<i64>()
    }
}
