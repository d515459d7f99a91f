//! Single-pass greedy assignment.
//!
//! # Algorithm
//!
//! 1. Build the day's slots exactly as the backtracking solver does
//!    (eligibility, most-constrained-first order).
//! 2. For each slot, pick the first candidate that is free within the
//!    day, ranking by primary role holder first, then by current load
//!    (carried-in plus already picked today), then input order.
//!
//! Never revisits a choice, so it can leave a slot empty that a
//! different earlier pick would have allowed filling. Selected with
//! `Strategy::Greedy` as a fast baseline; the engine never switches to it
//! on its own.
//!
//! # Complexity
//! O(s · c · b) where s=slots, c=candidates per slot, b=busy intervals
//! per user within the day.

use super::day_solver::{plan_slots, DaySolution};
use super::eligibility::role_type_for;
use super::load::CarryForward;
use super::partition::DayGroup;
use super::score::Scorer;
use crate::models::{RoleType, Shift, TimeWindow, User};

/// Solves one day greedily.
pub fn solve_day_greedy(
    group: &DayGroup,
    shifts: &[Shift],
    users: &[User],
    carry: &CarryForward,
    scorer: &Scorer<'_>,
) -> DaySolution {
    let (slots, candidate_counts) = plan_slots(group, shifts, users, carry);

    let mut loads: Vec<u32> = users.iter().map(|u| carry.loads.get(&u.id)).collect();
    let mut day_busy: Vec<Vec<TimeWindow>> = vec![Vec::new(); users.len()];
    let mut assignments = Vec::with_capacity(slots.len());
    let mut score = -scorer.base_penalty(&carry.loads);

    for slot in &slots {
        let shift = &shifts[slot.shift];
        let chosen = slot
            .candidates
            .iter()
            .copied()
            .filter(|&u| !day_busy[u].iter().any(|w| w.overlaps(&slot.window)))
            .min_by_key(|&u| {
                let holder_rank = match role_type_for(shift, &users[u]) {
                    Some(RoleType::Required) => 0u8,
                    _ => 1,
                };
                (holder_rank, loads[u], u)
            });

        if let Some(user) = chosen {
            score += scorer.assignment_value(shift, &users[user])
                - scorer.marginal_fairness(loads[user]);
            loads[user] += 1;
            day_busy[user].push(slot.window);
            assignments.push((slot.shift, user));
        }
    }

    assignments.sort();
    DaySolution {
        assignments,
        score,
        iterations: slots.len() as u64,
        exhausted: false,
        candidate_counts,
    }
}
