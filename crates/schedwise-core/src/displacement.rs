//! Displacement: force an urgent task into an occupied interval and ripple
//! the tasks it overlaps forward.
//!
//! Only tasks that directly overlap the urgent interval move. They keep their
//! original start order and duration and are chained back to back starting
//! at the urgent task's end. Tasks that were not overlapped stay where they
//! are even if a shifted task now lands on top of them; such collisions are
//! reported in [`DisplacementOutcome::secondary_collisions`] and left for the
//! caller to resolve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::task::{validate_tasks, Task};
use crate::time::TimeRange;

/// One displaced task's move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub task_id: String,
    pub from: TimeRange,
    pub to: TimeRange,
}

/// Whether the urgent task overwrote an existing record or was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgentPlacement {
    Replaced,
    Appended,
}

/// Two scheduled tasks on the same date whose intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub date: NaiveDate,
    pub first: String,
    pub second: String,
}

/// Result of one displacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplacementOutcome {
    /// Full replacement task set.
    pub tasks: Vec<Task>,
    /// Moves in the order they were applied.
    pub shifts: Vec<Shift>,
    pub urgent: UrgentPlacement,
    /// Displaced tasks that could not fit before midnight and were unscheduled.
    pub overflowed: Vec<String>,
    /// Shifted tasks that now overlap a task that was not moved.
    pub secondary_collisions: Vec<Collision>,
}

impl DisplacementOutcome {
    pub fn shift_for(&self, task_id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.task_id == task_id)
    }

    pub fn is_conflict_free(&self) -> bool {
        self.secondary_collisions.is_empty()
    }
}

/// Insert `urgent` at its requested interval, pushing overlapped tasks later.
///
/// `urgent` must carry a date and a forward interval; it is stored as
/// scheduled. Input is validated before anything is computed.
pub fn displace(urgent: &Task, tasks: &[Task]) -> Result<DisplacementOutcome, ValidationError> {
    validate_tasks(tasks)?;
    let mut urgent = urgent.clone();
    urgent.is_scheduled = true;
    urgent.validate()?;

    let (date, urgent_range) = match (urgent.date, urgent.range()) {
        (Some(date), Some(range)) => (date, range),
        // validate() guarantees both for a scheduled task
        _ => {
            return Err(ValidationError::MissingSchedule {
                task_id: urgent.id.clone(),
                field: "date",
            })
        }
    };

    let mut day: Vec<(usize, TimeRange)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id != urgent.id)
        .filter_map(|(i, t)| t.occupies(date).map(|r| (i, r)))
        .collect();
    day.sort_by_key(|(_, r)| r.start);

    let (displaced, untouched): (Vec<_>, Vec<_>) =
        day.into_iter().partition(|(_, r)| r.overlaps(&urgent_range));

    let mut out = tasks.to_vec();
    let mut shifts = Vec::with_capacity(displaced.len());
    let mut overflowed = Vec::new();
    let mut cursor = urgent_range.end;

    for (idx, from) in displaced {
        let task_id = tasks[idx].id.clone();
        match TimeRange::starting_at(cursor, from.duration_minutes()) {
            Some(to) => {
                debug!(task_id = %task_id, from = %from, to = %to, "ripple shift");
                out[idx].start_time = Some(to.start);
                out[idx].end_time = Some(to.end);
                cursor = to.end;
                shifts.push(Shift { task_id, from, to });
            }
            None => {
                warn!(task_id = %task_id, from = %from, "shift would cross midnight; unscheduling");
                out[idx].unschedule();
                overflowed.push(task_id);
            }
        }
    }

    let secondary_collisions = collect_secondary_collisions(date, &shifts, &untouched, tasks);
    if !secondary_collisions.is_empty() {
        warn!(
            date = %date,
            count = secondary_collisions.len(),
            "displacement left secondary collisions"
        );
    }

    let placement = match out.iter().position(|t| t.id == urgent.id) {
        Some(pos) => {
            out[pos] = urgent.clone();
            UrgentPlacement::Replaced
        }
        None => {
            out.push(urgent.clone());
            UrgentPlacement::Appended
        }
    };

    info!(
        task_id = %urgent.id,
        date = %date,
        shifted = shifts.len(),
        overflowed = overflowed.len(),
        "displacement complete"
    );

    Ok(DisplacementOutcome {
        tasks: out,
        shifts,
        urgent: placement,
        overflowed,
        secondary_collisions,
    })
}

fn collect_secondary_collisions(
    date: NaiveDate,
    shifts: &[Shift],
    untouched: &[(usize, TimeRange)],
    tasks: &[Task],
) -> Vec<Collision> {
    let mut found = Vec::new();
    for shift in shifts {
        for (idx, range) in untouched {
            if shift.to.overlaps(range) {
                found.push(Collision {
                    date,
                    first: shift.task_id.clone(),
                    second: tasks[*idx].id.clone(),
                });
            }
        }
    }
    found
}

/// Every overlapping pair among tasks scheduled on `date`, ordered by start.
pub fn find_collisions(tasks: &[Task], date: NaiveDate) -> Vec<Collision> {
    let mut day: Vec<(&Task, TimeRange)> = tasks
        .iter()
        .filter_map(|t| t.occupies(date).map(|r| (t, r)))
        .collect();
    day.sort_by_key(|(_, r)| r.start);

    let mut found = Vec::new();
    for (i, (a, ra)) in day.iter().enumerate() {
        for (b, rb) in &day[i + 1..] {
            if rb.start >= ra.end {
                break;
            }
            if ra.overlaps(rb) {
                found.push(Collision {
                    date,
                    first: a.id.clone(),
                    second: b.id.clone(),
                });
            }
        }
    }
    found
}

/// First scheduled task on the same date whose interval overlaps `task`.
pub fn first_conflict<'a>(task: &Task, tasks: &'a [Task]) -> Option<&'a Task> {
    let date = task.date?;
    let range = task.range()?;
    tasks
        .iter()
        .filter(|other| other.id != task.id)
        .find(|other| other.occupies(date).is_some_and(|r| r.overlaps(&range)))
}

/// How a caller-side insertion was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsertionOutcome {
    /// No conflict: the record was stored as given.
    Stored {
        tasks: Vec<Task>,
        urgent: UrgentPlacement,
    },
    /// The record overlapped scheduled work and displacement ran.
    Displaced(DisplacementOutcome),
}

impl InsertionOutcome {
    pub fn tasks(&self) -> &[Task] {
        match self {
            Self::Stored { tasks, .. } => tasks,
            Self::Displaced(outcome) => &outcome.tasks,
        }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::Stored { tasks, .. } => tasks,
            Self::Displaced(outcome) => outcome.tasks,
        }
    }
}

/// Add or update `task`, displacing scheduled work only when it conflicts.
pub fn insert_task(task: &Task, tasks: &[Task]) -> Result<InsertionOutcome, ValidationError> {
    validate_tasks(tasks)?;
    task.validate()?;

    if task.is_scheduled && first_conflict(task, tasks).is_some() {
        return displace(task, tasks).map(InsertionOutcome::Displaced);
    }

    let mut out = tasks.to_vec();
    let urgent = match out.iter().position(|t| t.id == task.id) {
        Some(pos) => {
            out[pos] = task.clone();
            UrgentPlacement::Replaced
        }
        None => {
            out.push(task.clone());
            UrgentPlacement::Appended
        }
    };
    Ok(InsertionOutcome::Stored { tasks: out, urgent })
}
