//! Shift rostering for volunteer and staff teams.
//!
//! Assigns people to time-boxed shifts under role eligibility, explicit
//! availability, no-double-booking and fairness constraints. A planning
//! run is a pure function from `(shifts, users, config)` to proposed
//! pairings plus a run report; callers persist and confirm the pairings.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Shift`, `User`, `RoleRequirement`,
//!   `Assignment`, `Roster`, `TimeWindow`
//! - **`scheduler`**: Day partitioning, per-day backtracking search,
//!   scoring, load carry-forward, greedy baseline, KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, intervals,
//!   conflicting role declarations)
//! - **`config`**: Tunable search budget, weights and day cut, TOML loading
//! - **`error`**: Crate error type
//!
//! # Example
//!
//! ```
//! use u_roster::models::{Shift, User};
//! use chrono::{TimeZone, Utc};
//!
//! let at = |h| Utc.with_ymd_and_hms(2025, 12, 7, h, 0, 0).unwrap();
//! let shifts = vec![
//!     Shift::new("guitar-am", at(9), at(11)).with_role("guitar"),
//!     Shift::new("guitar-pm", at(17), at(19)).with_role("guitar"),
//! ];
//! let users = vec![
//!     User::new("ana").with_required_role("guitar"),
//!     User::new("ben").with_required_role("guitar"),
//! ];
//!
//! let pairs = u_roster::assign(&shifts, &users).unwrap();
//! assert_eq!(pairs.len(), 2);
//! assert_ne!(pairs[0].user_id, pairs[1].user_id);
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{RosterConfig, Strategy};
pub use error::{Result, RosterError};
pub use scheduler::{assign, RosterScheduler};
