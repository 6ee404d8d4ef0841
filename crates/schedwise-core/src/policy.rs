//! Tunable thresholds for triage and assignment.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Candidate start times are enumerated at this step.
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 15;
/// A slot is still viable when hour energy falls short of the task cost by at most this much.
pub const DEFAULT_ENERGY_TOLERANCE: i32 = 10;
/// Energy assumed for an hour the curve does not cover.
pub const DEFAULT_FALLBACK_ENERGY: i32 = 50;
pub const DEFAULT_DEADLINE_WINDOW_HOURS: i64 = 48;
pub const DEFAULT_STALENESS_DAYS: i64 = 7;
pub const DEFAULT_DEADLINE_BONUS: i32 = 3;
pub const DEFAULT_STALENESS_BONUS: i32 = 1;
/// Upper bounds for the triage thresholds, one year each.
pub const MAX_DEADLINE_WINDOW_HOURS: i64 = 366 * 24;
pub const MAX_STALENESS_DAYS: i64 = 366;

/// Scheduling thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    #[serde(default = "default_slot_granularity")]
    pub slot_granularity_minutes: u32,
    #[serde(default = "default_energy_tolerance")]
    pub energy_tolerance: i32,
    #[serde(default = "default_fallback_energy")]
    pub fallback_energy: i32,
    #[serde(default = "default_deadline_window_hours")]
    pub deadline_window_hours: i64,
    #[serde(default = "default_staleness_days")]
    pub staleness_days: i64,
    #[serde(default = "default_deadline_bonus")]
    pub deadline_bonus: i32,
    #[serde(default = "default_staleness_bonus")]
    pub staleness_bonus: i32,
}

fn default_slot_granularity() -> u32 {
    DEFAULT_SLOT_GRANULARITY_MINUTES
}
fn default_energy_tolerance() -> i32 {
    DEFAULT_ENERGY_TOLERANCE
}
fn default_fallback_energy() -> i32 {
    DEFAULT_FALLBACK_ENERGY
}
fn default_deadline_window_hours() -> i64 {
    DEFAULT_DEADLINE_WINDOW_HOURS
}
fn default_staleness_days() -> i64 {
    DEFAULT_STALENESS_DAYS
}
fn default_deadline_bonus() -> i32 {
    DEFAULT_DEADLINE_BONUS
}
fn default_staleness_bonus() -> i32 {
    DEFAULT_STALENESS_BONUS
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            energy_tolerance: DEFAULT_ENERGY_TOLERANCE,
            fallback_energy: DEFAULT_FALLBACK_ENERGY,
            deadline_window_hours: DEFAULT_DEADLINE_WINDOW_HOURS,
            staleness_days: DEFAULT_STALENESS_DAYS,
            deadline_bonus: DEFAULT_DEADLINE_BONUS,
            staleness_bonus: DEFAULT_STALENESS_BONUS,
        }
    }
}

impl SchedulingPolicy {
    /// Saturates instead of panicking on values `validate` would reject.
    pub fn deadline_window(&self) -> Duration {
        Duration::try_hours(self.deadline_window_hours).unwrap_or(Duration::MAX)
    }

    pub fn staleness_threshold(&self) -> Duration {
        Duration::try_days(self.staleness_days).unwrap_or(Duration::MAX)
    }

    /// Minute offsets tried within each hour, e.g. `[0, 15, 30, 45]`.
    pub fn slot_offsets(&self) -> impl Iterator<Item = u32> {
        (0..60).step_by(self.slot_granularity_minutes.max(1) as usize)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field, message: &str| ValidationError::InvalidPolicy {
            field,
            message: message.to_string(),
        };
        let g = self.slot_granularity_minutes;
        if g == 0 || g > 60 || 60 % g != 0 {
            return Err(invalid(
                "slot_granularity_minutes",
                "must be a divisor of 60 greater than zero",
            ));
        }
        if self.energy_tolerance < 0 {
            return Err(invalid("energy_tolerance", "must not be negative"));
        }
        if !(1..=MAX_DEADLINE_WINDOW_HOURS).contains(&self.deadline_window_hours) {
            return Err(invalid("deadline_window_hours", "must be between 1 and 8784"));
        }
        if !(1..=MAX_STALENESS_DAYS).contains(&self.staleness_days) {
            return Err(invalid("staleness_days", "must be between 1 and 366"));
        }
        if self.deadline_bonus < 0 || self.staleness_bonus < 0 {
            return Err(invalid("bonus", "score bonuses must not be negative"));
        }
        Ok(())
    }
}
