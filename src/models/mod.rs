//! Rostering domain models.
//!
//! Provides the input types of a planning run (shifts and candidate
//! users) and its output (the roster of proposed assignments).
//!
//! # Domain Mappings
//!
//! | u-roster | Volunteer rota | Clinic | Support desk |
//! |----------|----------------|--------|--------------|
//! | Shift | Service slot | Ward shift | On-call window |
//! | User | Volunteer | Nurse | Engineer |
//! | Role | Team position | Qualification | Escalation tier |
//! | Roster | Monthly rota | Staffing plan | Rotation |

mod calendar;
mod roster;
mod shift;
mod user;

pub use calendar::{day_of, overlaps, TimeWindow};
pub use roster::{Assignment, DaySummary, Gap, Roster};
pub use shift::{AssignmentStatus, PriorAssignment, Shift};
pub use user::{RoleRequirement, RoleType, User};
