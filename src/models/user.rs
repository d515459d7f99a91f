//! Candidate user model.
//!
//! Users are the people shifts are assigned to. Each declares the roles
//! it can fill (as a primary holder or as a fill-in) and, optionally,
//! explicit allowlists restricting which shifts or dates it is available
//! for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A candidate for shift assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Roles this user can fill.
    #[serde(default)]
    pub roles: Vec<RoleRequirement>,
    /// Shift IDs the user is available for.
    /// `None` = available for every shift; `Some(empty)` = for none.
    #[serde(default)]
    pub available_shift_ids: Option<BTreeSet<String>>,
    /// Calendar dates the user is available on. Same convention as
    /// `available_shift_ids`.
    #[serde(default)]
    pub available_dates: Option<BTreeSet<NaiveDate>>,
}

/// A user's declared holding of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    /// Role identifier, matched against `Shift::role_id`.
    pub role_id: String,
    /// How the user holds the role.
    pub role_type: RoleType,
}

/// How a user holds a role.
///
/// Ordered so that `Required < Optional`: primary holders sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Primary holder of the role.
    Required,
    /// Fill-in capability.
    Optional,
}

impl User {
    /// Creates a user with no roles and no availability restriction.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
            available_shift_ids: None,
            available_dates: None,
        }
    }

    /// Adds a role holding.
    pub fn with_role(mut self, role_id: impl Into<String>, role_type: RoleType) -> Self {
        self.roles.push(RoleRequirement::new(role_id, role_type));
        self
    }

    /// Adds a role held as primary holder.
    pub fn with_required_role(self, role_id: impl Into<String>) -> Self {
        self.with_role(role_id, RoleType::Required)
    }

    /// Adds a role held as fill-in.
    pub fn with_optional_role(self, role_id: impl Into<String>) -> Self {
        self.with_role(role_id, RoleType::Optional)
    }

    /// Restricts availability to the given shift IDs.
    pub fn with_available_shifts<I, S>(mut self, shift_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_shift_ids = Some(shift_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts availability to the given calendar dates.
    pub fn with_available_dates<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.available_dates = Some(dates.into_iter().collect());
        self
    }

    /// Whether this user holds a role (of either type).
    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r.role_id == role_id)
    }

    /// How this user holds a role, if at all.
    pub fn role_type(&self, role_id: &str) -> Option<RoleType> {
        self.roles
            .iter()
            .find(|r| r.role_id == role_id)
            .map(|r| r.role_type)
    }

    /// Whether the user's allowlists admit a shift with this ID and date.
    pub fn is_available_for(&self, shift_id: &str, date: NaiveDate) -> bool {
        let shift_ok = self
            .available_shift_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(shift_id));
        let date_ok = self
            .available_dates
            .as_ref()
            .map_or(true, |dates| dates.contains(&date));
        shift_ok && date_ok
    }
}

impl RoleRequirement {
    /// Creates a new role requirement.
    pub fn new(role_id: impl Into<String>, role_type: RoleType) -> Self {
        Self {
            role_id: role_id.into(),
            role_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn test_user_builder() {
        let u = User::new("u1")
            .with_required_role("guitar")
            .with_optional_role("vocals");

        assert_eq!(u.id, "u1");
        assert!(u.has_role("guitar"));
        assert!(u.has_role("vocals"));
        assert!(!u.has_role("drums"));
        assert_eq!(u.role_type("guitar"), Some(RoleType::Required));
        assert_eq!(u.role_type("vocals"), Some(RoleType::Optional));
        assert_eq!(u.role_type("drums"), None);
    }

    #[test]
    fn test_role_type_ordering() {
        assert!(RoleType::Required < RoleType::Optional);
    }

    #[test]
    fn test_availability_unrestricted() {
        let u = User::new("u1");
        assert!(u.is_available_for("anything", day(7)));
    }

    #[test]
    fn test_availability_allowlists() {
        let u = User::new("u1").with_available_shifts(["s1", "s2"]);
        assert!(u.is_available_for("s1", day(7)));
        assert!(!u.is_available_for("s3", day(7)));

        let u = User::new("u2").with_available_dates([day(14)]);
        assert!(u.is_available_for("s1", day(14)));
        assert!(!u.is_available_for("s1", day(7)));

        let empty = User::new("u3").with_available_shifts(Vec::<String>::new());
        assert!(!empty.is_available_for("s1", day(7)));
    }

    #[test]
    fn test_role_type_serialization() {
        let r = RoleRequirement::new("Nursery", RoleType::Required);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"required\""));
        let back: RoleRequirement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
