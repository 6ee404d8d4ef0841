//! Planner facade binding a [`SchedulingPolicy`] to the three algorithms.

use chrono::{DateTime, NaiveDate, Utc};

use crate::assigner::{assign, AssignmentOutcome};
use crate::displacement::{displace, insert_task, DisplacementOutcome, InsertionOutcome};
use crate::energy::EnergyProfile;
use crate::error::ValidationError;
use crate::policy::SchedulingPolicy;
use crate::task::Task;
use crate::triage::triage;

/// Runs triage, assignment and displacement under one policy.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    policy: SchedulingPolicy,
}

impl Planner {
    /// Create a planner with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom policy
    pub fn with_policy(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    pub fn triage(&self, tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
        triage(tasks, now, &self.policy)
    }

    pub fn assign(
        &self,
        tasks: &[Task],
        profile: &EnergyProfile,
        target_date: NaiveDate,
    ) -> Result<AssignmentOutcome, ValidationError> {
        assign(tasks, profile, target_date, &self.policy)
    }

    /// Triage as of `now`, then assign onto `target_date`.
    ///
    /// The policy, profile and tasks are validated before triage runs so a
    /// bad input never yields a half-updated set.
    pub fn auto_schedule(
        &self,
        tasks: &[Task],
        profile: &EnergyProfile,
        target_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<AssignmentOutcome, ValidationError> {
        auto_schedule(tasks, profile, target_date, now, &self.policy)
    }

    pub fn displace(&self, urgent: &Task, tasks: &[Task]) -> Result<DisplacementOutcome, ValidationError> {
        displace(urgent, tasks)
    }

    pub fn insert(&self, task: &Task, tasks: &[Task]) -> Result<InsertionOutcome, ValidationError> {
        insert_task(task, tasks)
    }
}

/// Triage then assign, validating everything first.
pub fn auto_schedule(
    tasks: &[Task],
    profile: &EnergyProfile,
    target_date: NaiveDate,
    now: DateTime<Utc>,
    policy: &SchedulingPolicy,
) -> Result<AssignmentOutcome, ValidationError> {
    crate::task::validate_tasks(tasks)?;
    profile.validate()?;
    policy.validate()?;
    let triaged = triage(tasks, now, policy);
    assign(&triaged, profile, target_date, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap()
    }

    #[test]
    fn triage_reorders_candidates_before_assignment() {
        let mut curve = vec![40; 24];
        curve[10] = 90;
        let profile = EnergyProfile::default().with_curve(curve).with_budget(100);

        // Equal base scores; the deadline bonus lets "due" claim the peak hour.
        let tasks = vec![
            Task::new("plain", "x").with_priority(5).with_energy(20),
            Task::new("due", "x")
                .with_priority(5)
                .with_energy(20)
                .with_due_date(now() + Duration::hours(10)),
        ];

        let out = Planner::new()
            .auto_schedule(&tasks, &profile, now().date_naive(), now())
            .unwrap();
        assert_eq!(out.placements[0].task_id, "due");
        assert_eq!(out.placements[0].range.start.hour(), 10);
        assert_eq!(out.tasks[1].priority_score, 8);
        assert_eq!(out.tasks[0].last_triage_date, Some(now()));
    }

    #[test]
    fn invalid_policy_rejected_before_triage() {
        let mut policy = SchedulingPolicy::default();
        policy.slot_granularity_minutes = 0;
        let planner = Planner::with_policy(policy);
        let err = planner
            .auto_schedule(&[Task::new("a", "x")], &EnergyProfile::default(), now().date_naive(), now())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPolicy { .. }));
    }
}
