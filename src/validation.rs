//! Input validation for planning runs.
//!
//! Checks structural integrity of shifts and users before rostering.
//! Detects:
//! - Duplicate shift or user IDs
//! - Malformed intervals (`end <= start`)
//! - Users declaring the same role twice with different types
//!
//! Malformed intervals are rejected rather than normalized: a zero- or
//! negative-length shift cannot conflict with anything, so silently
//! scheduling it would hide a data error upstream.

use crate::models::{Shift, User};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A shift does not end after it starts.
    InvalidInterval,
    /// A user holds one role as both required and optional.
    ConflictingRole,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a planning run.
///
/// Checks:
/// 1. No duplicate shift IDs
/// 2. No duplicate user IDs
/// 3. Every shift ends strictly after it starts
/// 4. No user declares one role with two different types
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(shifts: &[Shift], users: &[User]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut shift_ids = HashSet::new();
    for shift in shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", shift.id),
            ));
        }

        if !shift.window().is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Shift '{}' ends at {} which is not after its start {}",
                    shift.id, shift.end, shift.start
                ),
            ));
        }
    }

    let mut user_ids = HashSet::new();
    for user in users {
        if !user_ids.insert(user.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate user ID: {}", user.id),
            ));
        }

        let mut seen = HashMap::new();
        for role in &user.roles {
            match seen.insert(role.role_id.as_str(), role.role_type) {
                Some(previous) if previous != role.role_type => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ConflictingRole,
                        format!(
                            "User '{}' declares role '{}' as both {:?} and {:?}",
                            user.id, role.role_id, previous, role.role_type
                        ),
                    ));
                }
                _ => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleType;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap()
    }

    fn sample_shifts() -> Vec<Shift> {
        vec![
            Shift::new("s1", at(10), at(11)).with_role("guitar"),
            Shift::new("s2", at(11), at(12)),
        ]
    }

    fn sample_users() -> Vec<User> {
        vec![
            User::new("u1").with_required_role("guitar"),
            User::new("u2").with_optional_role("guitar"),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_shifts(), &sample_users()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_input(&[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_shift_id() {
        let shifts = vec![
            Shift::new("s1", at(10), at(11)),
            Shift::new("s1", at(12), at(13)),
        ];
        let errors = validate_input(&shifts, &sample_users()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("shift")));
    }

    #[test]
    fn test_duplicate_user_id() {
        let users = vec![User::new("u1"), User::new("u1")];
        let errors = validate_input(&sample_shifts(), &users).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("user")));
    }

    #[test]
    fn test_invalid_interval() {
        let shifts = vec![
            Shift::new("empty", at(10), at(10)),
            Shift::new("backwards", at(12), at(11)),
        ];
        let errors = validate_input(&shifts, &sample_users()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidInterval)
                .count(),
            2
        );
    }

    #[test]
    fn test_conflicting_role_types() {
        let users = vec![User::new("u1")
            .with_role("guitar", RoleType::Required)
            .with_role("guitar", RoleType::Optional)];
        let errors = validate_input(&sample_shifts(), &users).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ConflictingRole));
    }

    #[test]
    fn test_repeated_identical_role_is_accepted() {
        let users = vec![User::new("u1")
            .with_required_role("guitar")
            .with_required_role("guitar")];
        assert!(validate_input(&sample_shifts(), &users).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let shifts = vec![
            Shift::new("s1", at(10), at(9)),
            Shift::new("s1", at(10), at(11)),
        ];
        let users = vec![User::new("u1"), User::new("u1")];
        let errors = validate_input(&shifts, &users).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].to_string(), errors[0].message);
    }
}
