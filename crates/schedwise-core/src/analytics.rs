//! Day-level summaries over a task set.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::energy::EnergyProfile;
use crate::task::Task;

/// Energy demand for one day against the curve's total capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnoutReport {
    pub date: NaiveDate,
    /// Sum of costs of scheduled, incomplete tasks on `date`.
    pub demand: i64,
    /// Sum of the 24 curve values.
    pub capacity: i64,
    /// Demand as a percentage of capacity, capped at 100.
    pub percentage: i64,
    pub raw_percentage: i64,
}

impl BurnoutReport {
    pub fn is_overloaded(&self) -> bool {
        self.raw_percentage > 100
    }
}

pub fn burnout(tasks: &[Task], profile: &EnergyProfile, date: NaiveDate) -> BurnoutReport {
    let demand: i64 = tasks
        .iter()
        .filter(|t| t.is_scheduled && !t.completed && t.date == Some(date))
        .map(|t| i64::from(t.estimated_energy_cost))
        .sum();
    let capacity = profile.total_capacity();
    let raw_percentage = if capacity > 0 {
        // Round half away from zero on non-negative integers.
        (demand * 200 + capacity) / (capacity * 2)
    } else {
        0
    };

    BurnoutReport {
        date,
        demand,
        capacity,
        percentage: raw_percentage.min(100),
        raw_percentage,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub done: usize,
    pub pending: usize,
}

pub fn completion(tasks: &[Task]) -> CompletionStats {
    let done = tasks.iter().filter(|t| t.completed).count();
    CompletionStats {
        done,
        pending: tasks.len() - done,
    }
}

const FOCUS_BUCKETS: [&str; 3] = ["Work", "Personal", "Health"];

/// Task counts per type bucket (`Work`, `Personal`, `Health`, `Other`).
pub fn focus_distribution(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = FOCUS_BUCKETS
        .iter()
        .chain(std::iter::once(&"Other"))
        .map(|b| (b.to_string(), 0))
        .collect();

    for task in tasks {
        let bucket = task
            .task_type
            .as_deref()
            .map(capitalize)
            .filter(|t| FOCUS_BUCKETS.contains(&t.as_str()))
            .unwrap_or_else(|| "Other".to_string());
        *counts.entry(bucket).or_default() += 1;
    }
    counts
}

fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
