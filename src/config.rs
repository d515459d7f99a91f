//! Engine configuration.
//!
//! Every tunable constant of a planning run lives here: the iteration
//! budget, the set of required-class roles, the score weights, the UTC
//! offset that defines calendar days, and the search strategy.
//!
//! # Examples
//!
//! ```
//! use u_roster::config::{RosterConfig, Strategy};
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     max_iterations = 50000
//!     required_roles = ["Nursery", "Preschool"]
//!     day_offset_minutes = -300
//!
//!     [weights]
//!     fairness = 20
//! "#).unwrap();
//!
//! assert_eq!(config.max_iterations, 50_000);
//! assert!(config.is_required_role("Nursery"));
//! assert_eq!(config.weights.fairness, 20);
//! assert_eq!(config.weights.coverage, 1_000_000);
//! assert_eq!(config.strategy, Strategy::Backtracking);
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default search-node ceiling per day.
pub const DEFAULT_MAX_ITERATIONS: u64 = 200_000;

/// Largest accepted score weight.
///
/// Keeps every day's score inside `i64` for millions of assignments and
/// per-user loads in the tens of thousands.
pub const MAX_WEIGHT: i64 = 1_000_000_000;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search strategy used for each day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exhaustive backtracking with an iteration budget.
    #[default]
    Backtracking,
    /// Single pass, most-constrained shift first, least-loaded user first.
    Greedy,
}

/// Weights of the additive score.
///
/// Magnitudes are spaced so that coverage dominates the required-class
/// bonus, which dominates role affinity, which dominates fairness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Reward per assignment.
    pub coverage: i64,
    /// Extra reward when the shift's role is required-class.
    pub required_coverage: i64,
    /// Extra reward for any other shift.
    pub optional_coverage: i64,
    /// Reward when the user is a primary holder of the shift's role.
    pub role_affinity: i64,
    /// Penalty factor on the square of each user's total load.
    pub fairness: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coverage: 1_000_000,
            required_coverage: 100_000,
            optional_coverage: 10_000,
            role_affinity: 50,
            fairness: 10,
        }
    }
}

impl ScoreWeights {
    /// Checks that every weight lies in `0..=MAX_WEIGHT`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("coverage", self.coverage),
            ("required_coverage", self.required_coverage),
            ("optional_coverage", self.optional_coverage),
            ("role_affinity", self.role_affinity),
            ("fairness", self.fairness),
        ];
        for (name, value) in named {
            if !(0..=MAX_WEIGHT).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "weight {name} must be within 0..={MAX_WEIGHT}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Search-node ceiling per day.
    pub max_iterations: u64,
    /// Roles whose coverage earns the required-class bonus.
    pub required_roles: BTreeSet<String>,
    /// UTC offset, in minutes, at which calendar days are cut.
    pub day_offset_minutes: i32,
    /// Per-day search strategy.
    pub strategy: Strategy,
    /// Keep solving multi-slot shifts that are only partly confirmed.
    pub fill_partially_confirmed: bool,
    /// Score weights.
    pub weights: ScoreWeights,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            required_roles: BTreeSet::new(),
            day_offset_minutes: 0,
            strategy: Strategy::Backtracking,
            fill_partially_confirmed: false,
            weights: ScoreWeights::default(),
        }
    }
}

impl RosterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML,
    /// or holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.day_offset()?;
        self.weights.validate()
    }

    /// The offset at which calendar days are cut.
    pub fn day_offset(&self) -> Result<FixedOffset, ConfigError> {
        if self.day_offset_minutes.abs() >= MINUTES_PER_DAY {
            return Err(ConfigError::Invalid(format!(
                "day_offset_minutes must be within ±{MINUTES_PER_DAY}, got {}",
                self.day_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.day_offset_minutes * 60).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "day_offset_minutes out of range: {}",
                self.day_offset_minutes
            ))
        })
    }

    /// Whether a role earns the required-class bonus.
    pub fn is_required_role(&self, role_id: &str) -> bool {
        self.required_roles.contains(role_id)
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Marks roles as required-class.
    pub fn with_required_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the day-cut offset in minutes east of UTC.
    pub fn with_day_offset_minutes(mut self, minutes: i32) -> Self {
        self.day_offset_minutes = minutes;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables filling the remaining slots of partly confirmed shifts.
    pub fn with_fill_partially_confirmed(mut self, enabled: bool) -> Self {
        self.fill_partially_confirmed = enabled;
        self
    }
}
