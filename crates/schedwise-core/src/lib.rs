//! # Schedwise Core Library
//!
//! Personal task-scheduling engine. Given a set of tasks with deadlines and
//! energy costs and a user's hourly energy profile, it decides which tasks
//! are most urgent, where in a day they should run, and how to move
//! already-scheduled work aside when something must be forced in.
//!
//! ## Architecture
//!
//! Every operation is a synchronous, pure transform over the caller's full
//! task set: it takes the records (plus profile, target date or "now" as
//! explicit arguments) and returns a fresh replacement set together with a
//! structured summary. Nothing is retained between calls.
//!
//! - **Triage** ([`triage()`]): staleness and deadline bonuses on unscheduled tasks
//! - **Assignment** ([`assign()`]): energy-aware slot search for one day under a budget
//! - **Displacement** ([`displace()`]): ripple-shift of tasks overlapped by an urgent insertion
//!
//! Unplaceable tasks and missing lookup targets are reported as data.
//! Malformed input is rejected with a [`ValidationError`] before any work
//! starts.
//!
//! ## Key Components
//!
//! - [`Task`]: the record exchanged with callers
//! - [`EnergyProfile`]: 24-hour energy curve, budget and schedulable window
//! - [`SchedulingPolicy`]: thresholds and tolerances
//! - [`Planner`]: binds a policy to the three algorithms
//! - [`Config`] / [`TaskFile`]: on-disk configuration and task storage for the CLI

pub mod analytics;
pub mod assigner;
pub mod displacement;
pub mod energy;
pub mod error;
pub mod policy;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod time;
pub mod triage;

pub use analytics::{burnout, completion, focus_distribution, BurnoutReport, CompletionStats};
pub use assigner::{assign, AssignmentOutcome, Placement, Skip, SkipReason};
pub use displacement::{
    displace, find_collisions, first_conflict, insert_task, Collision, DisplacementOutcome,
    InsertionOutcome, Shift, UrgentPlacement,
};
pub use energy::{EnergyPreset, EnergyProfile};
pub use error::{ConfigError, CoreError, TimeParseError, ValidationError};
pub use policy::SchedulingPolicy;
pub use scheduler::{auto_schedule, Planner};
pub use storage::{data_dir, Config, TaskFile};
pub use task::{validate_tasks, Task};
pub use time::{overlaps, ClockTime, TimeRange};
pub use triage::{triage, triage_bonus};
