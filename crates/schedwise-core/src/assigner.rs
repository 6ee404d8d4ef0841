//! Energy-aware assignment of unscheduled tasks into one day.
//!
//! Candidates (unscheduled and not completed) are taken highest
//! `priority_score` first; equal scores keep their input order. Each candidate
//! is placed into the free slot whose hour has the most energy, provided the
//! run still has budget for it. Tasks already scheduled on the target day seed
//! the occupancy model and are never moved.
//!
//! Slot search for one task:
//! 1. Try every start at `slot_granularity_minutes` steps across
//!    `[start_hour, end_hour)`.
//! 2. Drop starts whose end would run past `end_hour:00`.
//! 3. Drop starts that overlap anything already occupied.
//! 4. Keep the rest whose hour energy minus the task cost is at least
//!    `-energy_tolerance`, scored by that hour's energy.
//! 5. Pick the highest score; ties go to the earliest start.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::energy::EnergyProfile;
use crate::error::ValidationError;
use crate::policy::SchedulingPolicy;
use crate::task::{validate_tasks, Task};
use crate::time::{ClockTime, TimeRange};

/// A task committed to a slot during this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub task_id: String,
    pub date: NaiveDate,
    pub range: TimeRange,
    /// Energy-curve value at the chosen start hour.
    pub fit_score: i32,
    pub energy_cost: i32,
}

/// Why a candidate was left unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Cost exceeds what is left of the run's budget.
    InsufficientEnergy { cost: i32, available: i32 },
    /// No free slot in the window with enough energy.
    NoViableSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub task_id: String,
    pub reason: SkipReason,
}

/// Result of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Full replacement task set, in input order.
    pub tasks: Vec<Task>,
    /// Placements in the order candidates were considered.
    pub placements: Vec<Placement>,
    pub skipped: Vec<Skip>,
    /// Budget left after the run.
    pub remaining_energy: i32,
}

impl AssignmentOutcome {
    pub fn placement_for(&self, task_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task_id == task_id)
    }

    pub fn skip_for(&self, task_id: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.task_id == task_id)
            .map(|s| &s.reason)
    }

    pub fn energy_committed(&self) -> i32 {
        self.placements.iter().map(|p| p.energy_cost).sum()
    }
}

/// A slot that passed the boundary, conflict and energy checks.
#[derive(Debug, Clone, Copy)]
struct Slot {
    range: TimeRange,
    score: i32,
}

/// Schedule as many candidates onto `target_date` as budget and space allow.
///
/// Input is validated up front; on error nothing is computed.
pub fn assign(
    tasks: &[Task],
    profile: &EnergyProfile,
    target_date: NaiveDate,
    policy: &SchedulingPolicy,
) -> Result<AssignmentOutcome, ValidationError> {
    validate_tasks(tasks)?;
    profile.validate()?;
    policy.validate()?;

    let mut candidates: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_scheduled && !t.completed)
        .map(|(i, _)| i)
        .collect();
    // Stable: equal scores keep input order.
    candidates.sort_by(|&a, &b| tasks[b].priority_score.cmp(&tasks[a].priority_score));

    let mut occupied: Vec<TimeRange> = tasks
        .iter()
        .filter_map(|t| t.occupies(target_date))
        .collect();

    let mut out = tasks.to_vec();
    let mut budget = profile.remaining_energy;
    let mut placements = Vec::new();
    let mut skipped = Vec::new();

    for idx in candidates {
        let task = &tasks[idx];
        let cost = task.estimated_energy_cost;

        if cost > budget {
            debug!(task_id = %task.id, cost, budget, "skipping task: not enough energy");
            skipped.push(Skip {
                task_id: task.id.clone(),
                reason: SkipReason::InsufficientEnergy {
                    cost,
                    available: budget,
                },
            });
            continue;
        }

        let Some(slot) = best_slot(task, profile, policy, &occupied) else {
            debug!(task_id = %task.id, "skipping task: no viable slot");
            skipped.push(Skip {
                task_id: task.id.clone(),
                reason: SkipReason::NoViableSlot,
            });
            continue;
        };

        debug!(task_id = %task.id, range = %slot.range, score = slot.score, "placed task");
        out[idx].schedule_at(target_date, slot.range);
        occupied.push(slot.range);
        budget -= cost;
        placements.push(Placement {
            task_id: task.id.clone(),
            date: target_date,
            range: slot.range,
            fit_score: slot.score,
            energy_cost: cost,
        });
    }

    info!(
        date = %target_date,
        placed = placements.len(),
        skipped = skipped.len(),
        remaining_energy = budget,
        "assignment complete"
    );

    Ok(AssignmentOutcome {
        tasks: out,
        placements,
        skipped,
        remaining_energy: budget,
    })
}

/// Best viable slot for `task`, or `None`.
fn best_slot(
    task: &Task,
    profile: &EnergyProfile,
    policy: &SchedulingPolicy,
    occupied: &[TimeRange],
) -> Option<Slot> {
    let minutes = u32::try_from(task.time_required).ok()?;
    let window_end = ClockTime::from_hm(profile.end_hour, 0)?;
    let mut best: Option<Slot> = None;

    for hour in profile.start_hour..profile.end_hour {
        let energy = profile.energy_at(hour, policy.fallback_energy);
        let sufficient = energy - task.estimated_energy_cost >= -policy.energy_tolerance;

        for offset in policy.slot_offsets() {
            let Some(start) = ClockTime::from_hm(hour, offset) else {
                continue;
            };
            let Some(range) = TimeRange::starting_at(start, minutes) else {
                continue;
            };
            if range.end > window_end {
                continue;
            }
            if occupied.iter().any(|o| o.overlaps(&range)) {
                continue;
            }
            if !sufficient {
                continue;
            }
            // Strictly greater keeps the earliest start on ties.
            if best.map_or(true, |b| energy > b.score) {
                best = Some(Slot {
                    range,
                    score: energy,
                });
            }
        }
    }

    best
}
