//! Error types for u-roster.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Main error type for rostering operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Input shifts or users failed validation.
    #[error("invalid input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Configuration could not be loaded or is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RosterError {
    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            RosterError::Validation(errors) => errors,
            RosterError::Config(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RosterError::Validation(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Result type alias for rostering operations.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_error_display() {
        let err = RosterError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate shift ID: s1"),
            ValidationError::new(ValidationErrorKind::InvalidInterval, "Shift 's2' ends first"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate shift ID: s1 (and 1 more)"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = RosterError::from(ConfigError::Invalid("bad offset".into()));
        assert_eq!(err.to_string(), "Invalid configuration: bad offset");
        assert!(err.validation_errors().is_empty());
    }
}
