//! Triage: raise the priority of unscheduled tasks that are going stale or
//! approaching their deadline.
//!
//! Scheduled tasks pass through untouched. Every unscheduled task has its
//! `last_triage_date` stamped with `now`, and both bonuses are measured
//! against that stamp, so running triage twice at the same instant changes
//! nothing the second time.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::policy::SchedulingPolicy;
use crate::task::Task;

/// Score increase `task` earns at `now`. Zero for scheduled tasks.
///
/// - Staleness: more than `staleness_days` since the last triage.
/// - Deadline: due in the future and inside `deadline_window_hours`, granted
///   once, when the previous triage happened before the task entered the window.
pub fn triage_bonus(task: &Task, now: DateTime<Utc>, policy: &SchedulingPolicy) -> i32 {
    if task.is_scheduled {
        return 0;
    }

    let mut bonus = 0;

    if let Some(last) = task.last_triage_date {
        if now - last > policy.staleness_threshold() {
            bonus += policy.staleness_bonus;
        }
    }

    if let Some(due) = task.due_date {
        let until_due = due - now;
        let in_window = until_due > chrono::Duration::zero() && until_due < policy.deadline_window();
        let already_counted = task
            .last_triage_date
            .is_some_and(|last| last <= now && due - last < policy.deadline_window());
        if in_window && !already_counted {
            bonus += policy.deadline_bonus;
        }
    }

    bonus
}

/// Re-score every unscheduled task as of `now`.
pub fn triage(tasks: &[Task], now: DateTime<Utc>, policy: &SchedulingPolicy) -> Vec<Task> {
    let mut bumped = 0usize;
    let out: Vec<Task> = tasks
        .iter()
        .map(|task| {
            if task.is_scheduled {
                return task.clone();
            }
            let bonus = triage_bonus(task, now, policy);
            if bonus > 0 {
                bumped += 1;
                debug!(task_id = %task.id, bonus, "triage bonus");
            }
            let mut updated = task.clone();
            updated.priority_score = updated.priority_score.saturating_add(bonus);
            updated.last_triage_date = Some(now);
            updated
        })
        .collect();

    info!(total = tasks.len(), bumped, "triage complete");
    out
}
