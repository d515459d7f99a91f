//! Eligibility filtering.
//!
//! A user is eligible for a shift iff:
//! - it holds the shift's role (when the shift has one), AND
//! - its allowlists admit the shift (when it declares any), AND
//! - none of its busy intervals overlaps the shift.

use chrono::NaiveDate;

use super::load::BusyMap;
use crate::models::{RoleType, Shift, User};

/// Whether `user` may fill `shift` on `date` given `busy`.
pub fn is_eligible(shift: &Shift, date: NaiveDate, user: &User, busy: &BusyMap) -> bool {
    if let Some(role_id) = &shift.role_id {
        if !user.has_role(role_id) {
            return false;
        }
    }
    if !user.is_available_for(&shift.id, date) {
        return false;
    }
    !busy.is_busy(&user.id, &shift.window())
}

/// Indices of the users eligible for `shift`, in input order.
pub fn eligible_candidates(
    shift: &Shift,
    date: NaiveDate,
    users: &[User],
    busy: &BusyMap,
) -> Vec<usize> {
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| is_eligible(shift, date, user, busy))
        .map(|(idx, _)| idx)
        .collect()
}

/// How `user` holds the role `shift` asks for.
///
/// Role-less shifts count as optional holdings for everyone.
pub fn role_type_for(shift: &Shift, user: &User) -> Option<RoleType> {
    match &shift.role_id {
        None => Some(RoleType::Optional),
        Some(role_id) => user.role_type(role_id),
    }
}
