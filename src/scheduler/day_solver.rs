//! Per-day backtracking search.
//!
//! # Algorithm
//!
//! 1. Compute each open shift's eligible candidates once, against the
//!    committed (cross-day) busy map only.
//! 2. Rank each shift's candidates: primary role holders first, then
//!    ascending carried-in load, then input order.
//! 3. Expand shifts into slots (`open_slots` per shift) and order slots
//!    most-constrained-first (fewest candidates), stable by input order.
//! 4. Depth-first search over slots. At each slot try every ranked
//!    candidate that is free within the day, then try leaving the slot
//!    empty. Complete assignments are scored; the strictly best one wins,
//!    so among equal scores the first found is kept.
//!
//! Sibling slots of a multi-slot shift are symmetric. They take
//! candidates in increasing rank order, and once one is left empty the
//! rest are too, so each set of occupants is enumerated once.
//!
//! Every visited node counts against the iteration budget. When the
//! budget runs out the search unwinds and the best complete assignment
//! seen so far is returned, flagged as exhausted.
//!
//! # Complexity
//! O(Π (c_i + 1)) nodes in the worst case, c_i = candidates of slot i;
//! capped by the budget.

use super::eligibility::{eligible_candidates, role_type_for};
use super::load::CarryForward;
use super::partition::DayGroup;
use super::score::Scorer;
use crate::models::{RoleType, Shift, TimeWindow, User};

/// One slot variable of the search.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    /// Index into the input shift slice.
    pub shift: usize,
    pub window: TimeWindow,
    /// Candidate user indices, best first.
    pub candidates: Vec<usize>,
    /// Whether the previous slot belongs to the same shift.
    pub continues_shift: bool,
}

/// Best assignment found for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySolution {
    /// `(shift index, user index)` pairs, ordered by shift input order.
    pub assignments: Vec<(usize, usize)>,
    /// Score of `assignments`.
    pub score: i64,
    /// Search nodes visited.
    pub iterations: u64,
    /// Whether the iteration budget stopped the search.
    pub exhausted: bool,
    /// Eligible candidate count per open shift, in day-group order.
    pub candidate_counts: Vec<usize>,
}

/// Builds the ordered slot list for a day.
pub(crate) fn plan_slots(
    group: &DayGroup,
    shifts: &[Shift],
    users: &[User],
    carry: &CarryForward,
) -> (Vec<Slot>, Vec<usize>) {
    let mut slots = Vec::with_capacity(group.slot_count());
    let mut candidate_counts = Vec::with_capacity(group.shifts.len());

    for open in &group.shifts {
        let shift = &shifts[open.index];
        let mut candidates = eligible_candidates(shift, group.day, users, &carry.busy);
        rank_candidates(&mut candidates, shift, users, carry);
        candidate_counts.push(candidates.len());

        for _ in 0..open.open_slots {
            slots.push(Slot {
                shift: open.index,
                window: shift.window(),
                candidates: candidates.clone(),
                continues_shift: false,
            });
        }
    }

    // Stable: slots of one shift share a key and stay adjacent.
    slots.sort_by_key(|s| s.candidates.len());
    for i in 1..slots.len() {
        slots[i].continues_shift = slots[i - 1].shift == slots[i].shift;
    }

    (slots, candidate_counts)
}

/// Orders candidates: primary holders, then lighter load, then input order.
fn rank_candidates(candidates: &mut [usize], shift: &Shift, users: &[User], carry: &CarryForward) {
    candidates.sort_by_key(|&u| {
        let holder_rank = match role_type_for(shift, &users[u]) {
            Some(RoleType::Required) => 0u8,
            _ => 1,
        };
        (holder_rank, carry.loads.get(&users[u].id), u)
    });
}

/// Solves one day by bounded backtracking.
pub fn solve_day(
    group: &DayGroup,
    shifts: &[Shift],
    users: &[User],
    carry: &CarryForward,
    scorer: &Scorer<'_>,
    max_iterations: u64,
) -> DaySolution {
    let (slots, candidate_counts) = plan_slots(group, shifts, users, carry);
    let mut search = DaySearch::new(slots, shifts, users, carry, scorer, max_iterations);
    search.run();

    let (score, mut assignments) = search.best.unwrap_or((search.base_score, Vec::new()));
    assignments.sort();

    DaySolution {
        assignments,
        score,
        iterations: search.iterations,
        exhausted: search.exhausted,
        candidate_counts,
    }
}

/// One open node of the search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Slot branched on.
    index: usize,
    /// Next candidate rank to try.
    next_rank: usize,
    /// User placed by the branch currently being explored.
    pushed: Option<usize>,
    /// Whether the empty branch has been taken.
    skipped: bool,
}

/// Mutable state of one day's search.
///
/// Owned by a single `solve_day` call. Every push is undone by a pop
/// before its frame is discarded; the committed carry-forward state is
/// only borrowed.
struct DaySearch<'a> {
    slots: Vec<Slot>,
    shifts: &'a [Shift],
    users: &'a [User],
    scorer: &'a Scorer<'a>,
    /// Carried-in load per user index.
    base_loads: Vec<u32>,
    /// In-day load per user index.
    day_loads: Vec<u32>,
    /// In-day occupied intervals per user index.
    day_busy: Vec<Vec<TimeWindow>>,
    /// Current partial assignment: `(shift, user)`.
    stack: Vec<(usize, usize)>,
    /// Rank chosen at each slot, `None` if left empty.
    chosen_rank: Vec<Option<usize>>,
    /// Score of the carried-in loads alone.
    base_score: i64,
    /// Score of `stack` on top of `base_score`.
    running: i64,
    best: Option<(i64, Vec<(usize, usize)>)>,
    iterations: u64,
    max_iterations: u64,
    exhausted: bool,
}

impl<'a> DaySearch<'a> {
    fn new(
        slots: Vec<Slot>,
        shifts: &'a [Shift],
        users: &'a [User],
        carry: &CarryForward,
        scorer: &'a Scorer<'a>,
        max_iterations: u64,
    ) -> Self {
        let base_score = -scorer.base_penalty(&carry.loads);
        let slot_count = slots.len();
        Self {
            slots,
            shifts,
            users,
            scorer,
            base_loads: users.iter().map(|u| carry.loads.get(&u.id)).collect(),
            day_loads: vec![0; users.len()],
            day_busy: vec![Vec::new(); users.len()],
            stack: Vec::with_capacity(slot_count),
            chosen_rank: vec![None; slot_count],
            base_score,
            running: base_score,
            best: None,
            iterations: 0,
            max_iterations,
            exhausted: false,
        }
    }

    /// Depth-first search driven by an explicit frame stack, so the depth
    /// of a day (one frame per slot) lives on the heap.
    fn run(&mut self) {
        let mut frames: Vec<Frame> = Vec::with_capacity(self.slots.len() + 1);
        if let Some(root) = self.enter(0) {
            frames.push(root);
        }

        while let Some(frame) = frames.last_mut() {
            let index = frame.index;
            // Undo the branch just returned from.
            if let Some(user) = frame.pushed.take() {
                self.pop(index, user);
            }
            if self.exhausted {
                frames.pop();
                continue;
            }

            let mut descend = false;
            while frame.next_rank < self.slots[index].candidates.len() {
                let rank = frame.next_rank;
                frame.next_rank += 1;
                let user = self.slots[index].candidates[rank];
                if self.is_busy_today(user, index) {
                    continue;
                }
                self.push(index, user, rank);
                frame.pushed = Some(user);
                descend = true;
                break;
            }

            if !descend {
                if frame.skipped {
                    frames.pop();
                    continue;
                }
                frame.skipped = true;
                self.chosen_rank[index] = None;
            }

            if let Some(child) = self.enter(index + 1) {
                frames.push(child);
            }
        }
    }

    /// Visits a node. Returns a frame if the node has slots to branch on.
    fn enter(&mut self, index: usize) -> Option<Frame> {
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            self.exhausted = true;
            return None;
        }

        if index == self.slots.len() {
            self.record_if_better();
            return None;
        }

        let next_rank = if self.slots[index].continues_shift {
            match self.chosen_rank[index - 1] {
                Some(rank) => rank + 1,
                // An earlier sibling is empty: this one stays empty too.
                None => self.slots[index].candidates.len(),
            }
        } else {
            0
        };

        Some(Frame {
            index,
            next_rank,
            pushed: None,
            skipped: false,
        })
    }

    fn is_busy_today(&self, user: usize, index: usize) -> bool {
        let window = &self.slots[index].window;
        self.day_busy[user].iter().any(|w| w.overlaps(window))
    }

    fn push(&mut self, index: usize, user: usize, rank: usize) {
        let shift = self.slots[index].shift;
        let load = self.base_loads[user] + self.day_loads[user];

        self.running += self
            .scorer
            .assignment_value(&self.shifts[shift], &self.users[user])
            - self.scorer.marginal_fairness(load);
        self.day_loads[user] += 1;
        self.day_busy[user].push(self.slots[index].window);
        self.stack.push((shift, user));
        self.chosen_rank[index] = Some(rank);
    }

    fn pop(&mut self, index: usize, user: usize) {
        let shift = self.slots[index].shift;
        self.stack.pop();
        self.day_busy[user].pop();
        self.day_loads[user] -= 1;
        let load = self.base_loads[user] + self.day_loads[user];

        self.running -= self
            .scorer
            .assignment_value(&self.shifts[shift], &self.users[user])
            - self.scorer.marginal_fairness(load);
        self.chosen_rank[index] = None;
    }

    fn record_if_better(&mut self) {
        let improves = match &self.best {
            None => true,
            Some((best, _)) => self.running > *best,
        };
        if improves {
            self.best = Some((self.running, self.stack.clone()));
        }
    }
}
