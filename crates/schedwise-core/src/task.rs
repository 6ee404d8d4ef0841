//! Task record exchanged with the caller.
//!
//! Scheduling state is kept flat (`is_scheduled`, `date`, `start_time`,
//! `end_time`) so records round-trip unchanged through whatever store the
//! caller uses. `date` and the times are only meaningful while `is_scheduled`
//! is set.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{lenient_instant, ClockTime, TimeRange};

/// Defaults applied to manually entered tasks.
pub const MANUAL_PRIORITY_SCORE: i32 = 50;
pub const MANUAL_ENERGY_COST: i32 = 50;
pub const MANUAL_TIME_REQUIRED: i32 = 60;

/// A unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form category such as "work", "personal" or "health".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    #[serde(default)]
    pub is_scheduled: bool,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "startTime")]
    pub start_time: Option<ClockTime>,
    #[serde(default, alias = "endTime")]
    pub end_time: Option<ClockTime>,

    #[serde(default)]
    pub priority_score: i32,
    #[serde(default)]
    pub estimated_energy_cost: i32,
    /// Minutes.
    #[serde(default = "default_time_required")]
    pub time_required: i32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "lenient_instant")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_instant")]
    pub last_triage_date: Option<DateTime<Utc>>,
}

fn default_time_required() -> i32 {
    MANUAL_TIME_REQUIRED
}

impl Task {
    /// Unscheduled task with zero score, zero cost and the default duration.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            task_type: None,
            is_scheduled: false,
            date: None,
            start_time: None,
            end_time: None,
            priority_score: 0,
            estimated_energy_cost: 0,
            time_required: MANUAL_TIME_REQUIRED,
            completed: false,
            due_date: None,
            last_triage_date: None,
        }
    }

    /// Task as created from the manual-entry form.
    pub fn manual(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title)
            .with_priority(MANUAL_PRIORITY_SCORE)
            .with_energy(MANUAL_ENERGY_COST)
            .with_duration(MANUAL_TIME_REQUIRED)
    }

    pub fn with_priority(mut self, score: i32) -> Self {
        self.priority_score = score;
        self
    }

    pub fn with_energy(mut self, cost: i32) -> Self {
        self.estimated_energy_cost = cost;
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.time_required = minutes;
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_last_triage(mut self, at: DateTime<Utc>) -> Self {
        self.last_triage_date = Some(at);
        self
    }

    pub fn with_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = Some(task_type.into());
        self
    }

    pub fn with_schedule(mut self, date: NaiveDate, range: TimeRange) -> Self {
        self.schedule_at(date, range);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Interval occupied by this task, if both ends are set.
    pub fn range(&self) -> Option<TimeRange> {
        Some(TimeRange::new(self.start_time?, self.end_time?))
    }

    /// Scheduled on `date` with a usable interval.
    pub fn occupies(&self, date: NaiveDate) -> Option<TimeRange> {
        if self.is_scheduled && self.date == Some(date) {
            self.range()
        } else {
            None
        }
    }

    pub fn schedule_at(&mut self, date: NaiveDate, range: TimeRange) {
        self.is_scheduled = true;
        self.date = Some(date);
        self.start_time = Some(range.start);
        self.end_time = Some(range.end);
    }

    pub fn unschedule(&mut self) {
        self.is_scheduled = false;
        self.date = None;
        self.start_time = None;
        self.end_time = None;
    }

    /// Check the per-record invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyTaskId);
        }
        if self.time_required < 0 {
            return Err(ValidationError::NegativeDuration {
                task_id: self.id.clone(),
                minutes: self.time_required,
            });
        }
        if self.time_required == 0 {
            return Err(ValidationError::NonPositiveDuration {
                task_id: self.id.clone(),
            });
        }
        if self.estimated_energy_cost < 0 {
            return Err(ValidationError::NegativeEnergyCost {
                task_id: self.id.clone(),
                cost: self.estimated_energy_cost,
            });
        }
        if self.is_scheduled {
            self.validate_schedule()?;
        }
        Ok(())
    }

    /// Check that a scheduled task carries a date and a forward interval.
    pub fn validate_schedule(&self) -> Result<(), ValidationError> {
        let missing = |field| ValidationError::MissingSchedule {
            task_id: self.id.clone(),
            field,
        };
        if self.date.is_none() {
            return Err(missing("date"));
        }
        let start = self.start_time.ok_or_else(|| missing("start_time"))?;
        let end = self.end_time.ok_or_else(|| missing("end_time"))?;
        if start >= end {
            return Err(ValidationError::InvertedInterval {
                task_id: self.id.clone(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(())
    }
}

/// Validate a whole task set: every record plus id uniqueness.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(ClockTime::parse(a).unwrap(), ClockTime::parse(b).unwrap())
    }

    #[test]
    fn manual_entry_defaults() {
        let t = Task::manual("t1", "Write report");
        assert_eq!(t.priority_score, 50);
        assert_eq!(t.estimated_energy_cost, 50);
        assert_eq!(t.time_required, 60);
        assert!(!t.is_scheduled);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let t = Task::new("t1", "x").with_duration(-30);
        assert_eq!(
            t.validate(),
            Err(ValidationError::NegativeDuration {
                task_id: "t1".into(),
                minutes: -30
            })
        );
    }

    #[test]
    fn scheduled_task_needs_forward_interval() {
        let mut t = Task::new("t1", "x");
        t.is_scheduled = true;
        t.date = Some(date());
        assert!(matches!(
            t.validate(),
            Err(ValidationError::MissingSchedule { field: "start_time", .. })
        ));

        let t = Task::new("t2", "x").with_schedule(date(), range("11:00", "10:00"));
        assert!(matches!(t.validate(), Err(ValidationError::InvertedInterval { .. })));

        let t = Task::new("t3", "x").with_schedule(date(), range("10:00", "11:00"));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![Task::new("a", "one"), Task::new("a", "two")];
        assert_eq!(
            validate_tasks(&tasks),
            Err(ValidationError::DuplicateTaskId("a".into()))
        );
    }

    #[test]
    fn occupies_only_its_own_date() {
        let t = Task::new("t1", "x").with_schedule(date(), range("09:00", "10:00"));
        assert!(t.occupies(date()).is_some());
        assert!(t.occupies(date().succ_opt().unwrap()).is_none());
    }

    #[test]
    fn deserializes_records_from_the_web_client() {
        let json = r#"{
            "id": "42",
            "title": "Gym",
            "type": "health",
            "is_scheduled": true,
            "date": "2026-03-02",
            "startTime": "07:00",
            "endTime": "08:00",
            "priority_score": 10,
            "estimated_energy_cost": 30,
            "time_required": 60,
            "due_date": "not a date",
            "last_triage_date": "2026-02-20T09:00:00.000Z"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.range(), Some(range("07:00", "08:00")));
        assert_eq!(t.task_type.as_deref(), Some("health"));
        assert!(t.due_date.is_none());
        assert!(t.last_triage_date.is_some());
    }
}
