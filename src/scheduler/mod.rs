//! Roster scheduling engine.
//!
//! Assigns users to shifts one calendar day at a time, carrying load and
//! busy intervals forward so that later days see earlier commitments.
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | `eligibility` | Role, availability and busy-interval filter |
//! | `partition` | Day grouping, confirmed-assignment seeding |
//! | `day_solver` | Bounded backtracking search per day |
//! | `greedy` | Single-pass baseline per day |
//! | `score` | Coverage, role class, affinity and fairness terms |
//! | `load` | Cross-day busy map and load counters |
//! | `engine` | [`RosterScheduler`] gluing the above |
//! | `kpi` | Coverage and fairness metrics of a finished roster |
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6 (backtracking search, most-constrained variable)

mod day_solver;
mod eligibility;
mod engine;
mod greedy;
mod kpi;
mod load;
mod partition;
mod score;

pub use day_solver::{solve_day, DaySolution};
pub use eligibility::{eligible_candidates, is_eligible, role_type_for};
pub use engine::{assign, RosterScheduler};
pub use greedy::solve_day_greedy;
pub use kpi::CoverageKpi;
pub use load::{BusyMap, CarryForward, LoadCounters};
pub use partition::{partition_by_day, DayGroup, OpenShift, Partition};
pub use score::Scorer;
