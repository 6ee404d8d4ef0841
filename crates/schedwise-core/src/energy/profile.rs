//! Energy profile type, chronotype presets and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Hours in the curve; index 0 is midnight.
pub const HOURS_PER_DAY: usize = 24;

/// Curve given to a new user.
pub const DEFAULT_CURVE: [i32; HOURS_PER_DAY] = [
    50, 50, 50, 50, 60, 70, 90, 100, 100, 90, 80, 70, //
    60, 50, 40, 50, 60, 70, 70, 60, 50, 40, 30, 30,
];

const LARK_CURVE: [i32; HOURS_PER_DAY] = [
    50, 50, 50, 50, 60, 90, 100, 100, 90, 80, 70, 60, //
    60, 50, 40, 50, 60, 50, 40, 30, 20, 20, 20, 20,
];

const OWL_CURVE: [i32; HOURS_PER_DAY] = [
    80, 70, 60, 40, 30, 20, 20, 30, 40, 50, 60, 60, //
    60, 70, 80, 90, 100, 100, 100, 90, 80, 70, 60, 80,
];

const BALANCED_CURVE: [i32; HOURS_PER_DAY] = [
    40, 40, 40, 40, 50, 60, 70, 80, 90, 90, 90, 80, //
    70, 70, 70, 70, 70, 70, 60, 50, 40, 30, 30, 30,
];

pub const DEFAULT_REMAINING_ENERGY: i32 = 800;
pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 22;

/// Named chronotype curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyPreset {
    /// Early riser, peaks around 06:00-08:00
    Lark,
    /// Night owl, peaks in the late afternoon and evening
    Owl,
    /// Broad plateau across the working day
    Balanced,
}

impl EnergyPreset {
    pub const ALL: [EnergyPreset; 3] = [Self::Lark, Self::Owl, Self::Balanced];

    pub fn curve(self) -> [i32; HOURS_PER_DAY] {
        match self {
            Self::Lark => LARK_CURVE,
            Self::Owl => OWL_CURVE,
            Self::Balanced => BALANCED_CURVE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lark => "lark",
            Self::Owl => "owl",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for EnergyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnergyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lark" => Ok(Self::Lark),
            "owl" => Ok(Self::Owl),
            "balanced" => Ok(Self::Balanced),
            other => Err(format!("unknown preset '{other}' (expected lark, owl or balanced)")),
        }
    }
}

/// Capacity over a day plus the budget for one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyProfile {
    /// 24 values in 0-100, one per hour of day.
    #[serde(default = "default_curve")]
    pub energy_curve: Vec<i32>,
    /// Budget for the current run. Consumed by the assigner, never replenished within a run.
    #[serde(default = "default_remaining_energy")]
    pub remaining_energy: i32,
    /// First schedulable hour.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Exclusive end of the schedulable window.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

fn default_curve() -> Vec<i32> {
    DEFAULT_CURVE.to_vec()
}
fn default_remaining_energy() -> i32 {
    DEFAULT_REMAINING_ENERGY
}
fn default_start_hour() -> u32 {
    DEFAULT_START_HOUR
}
fn default_end_hour() -> u32 {
    DEFAULT_END_HOUR
}

impl Default for EnergyProfile {
    fn default() -> Self {
        Self {
            energy_curve: default_curve(),
            remaining_energy: DEFAULT_REMAINING_ENERGY,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl EnergyProfile {
    /// Default window and budget over a preset curve.
    pub fn from_preset(preset: EnergyPreset) -> Self {
        let mut profile = Self::default();
        profile.apply_preset(preset);
        profile
    }

    pub fn with_curve(mut self, curve: impl Into<Vec<i32>>) -> Self {
        self.energy_curve = curve.into();
        self
    }

    pub fn with_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    pub fn with_budget(mut self, remaining_energy: i32) -> Self {
        self.remaining_energy = remaining_energy;
        self
    }

    pub fn apply_preset(&mut self, preset: EnergyPreset) {
        self.energy_curve = preset.curve().to_vec();
    }

    /// Energy expected at `hour`, or `fallback` when the curve has no entry.
    pub fn energy_at(&self, hour: u32, fallback: i32) -> i32 {
        self.energy_curve
            .get(hour as usize)
            .copied()
            .unwrap_or(fallback)
    }

    /// Set one hour of the curve.
    pub fn set_hour(&mut self, hour: usize, value: i32) -> Result<(), ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::CurveValueOutOfRange { hour, value });
        }
        let len = self.energy_curve.len();
        let slot = self
            .energy_curve
            .get_mut(hour)
            .ok_or(ValidationError::CurveLength(len))?;
        *slot = value;
        Ok(())
    }

    /// Sum of the curve, used as a proxy for daily capacity.
    pub fn total_capacity(&self) -> i64 {
        self.energy_curve.iter().map(|&v| i64::from(v)).sum()
    }

    /// Hours inside the schedulable window, highest energy first.
    pub fn peak_hours(&self, count: usize) -> Vec<u32> {
        let mut hours: Vec<u32> = (self.start_hour..self.end_hour).collect();
        hours.sort_by_key(|&h| std::cmp::Reverse(self.energy_at(h, 0)));
        hours.truncate(count);
        hours
    }

    /// Check the profile invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.energy_curve.len() != HOURS_PER_DAY {
            return Err(ValidationError::CurveLength(self.energy_curve.len()));
        }
        if let Some((hour, &value)) = self
            .energy_curve
            .iter()
            .enumerate()
            .find(|(_, v)| !(0..=100).contains(*v))
        {
            return Err(ValidationError::CurveValueOutOfRange { hour, value });
        }
        if self.start_hour >= self.end_hour || self.end_hour > HOURS_PER_DAY as u32 {
            return Err(ValidationError::InvalidHourWindow {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    /// Render the curve as an ASCII bar chart, marking the schedulable window.
    pub fn render_ascii_chart(&self) -> String {
        let mut output = String::from("\nEnergy Curve:\n");
        output.push_str(&"─".repeat(50));
        output.push('\n');

        for hour in 0..HOURS_PER_DAY as u32 {
            let energy = self.energy_at(hour, 0).clamp(0, 100);
            let bar_length = (energy as usize * 30) / 100;
            let bar = "█".repeat(bar_length);
            let empty = " ".repeat(30 - bar_length);
            let marker = if (self.start_hour..self.end_hour).contains(&hour) {
                "●"
            } else {
                "·"
            };
            output.push_str(&format!("{hour:02}:00 {bar}{empty}{marker} {energy:>3}\n"));
        }

        output.push_str(&"─".repeat(50));
        output.push_str("\n● Schedulable  · Outside window\n");
        output
    }
}
