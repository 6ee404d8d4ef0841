//! Task management commands for CLI.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use schedwise_core::time::parse_instant;
use schedwise_core::{insert_task, ClockTime, InsertionOutcome, Task, TaskFile, TimeRange};
use uuid::Uuid;

fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s).ok_or_else(|| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got '{s}'"))
}

/// Place `task` at `start`. An explicit `end` sets `time_required` to the
/// interval length; otherwise the interval is `time_required` long.
fn schedule_from_args(
    task: &mut Task,
    date: NaiveDate,
    start: ClockTime,
    end: Option<ClockTime>,
) -> Result<(), String> {
    let range = match end {
        Some(end) => {
            let range = TimeRange::new(start, end);
            // An inverted interval keeps the duration and is rejected by validation.
            if let Ok(minutes) = i32::try_from(range.duration_minutes()) {
                if minutes > 0 {
                    task.time_required = minutes;
                }
            }
            range
        }
        None => u32::try_from(task.time_required)
            .ok()
            .and_then(|m| TimeRange::starting_at(start, m))
            .ok_or_else(|| "task would run past midnight".to_string())?,
    };
    task.schedule_at(date, range);
    Ok(())
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Category, e.g. work, personal or health
        #[arg(long = "type")]
        task_type: Option<String>,
        /// Priority score
        #[arg(long, default_value = "50")]
        priority: i32,
        /// Estimated energy cost
        #[arg(long, default_value = "50")]
        energy: i32,
        /// Duration in minutes
        #[arg(long, default_value = "60")]
        minutes: i32,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
        /// Schedule directly on this day
        #[arg(long, requires = "start")]
        date: Option<NaiveDate>,
        /// Start time (HH:MM), requires --date
        #[arg(long, requires = "date")]
        start: Option<ClockTime>,
        /// End time (HH:MM, default: start + minutes)
        #[arg(long, requires = "start")]
        end: Option<ClockTime>,
    },
    /// List tasks
    List {
        /// Only tasks scheduled on this day
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let file = TaskFile::open_default()?;

    match action {
        TaskAction::Add {
            title,
            description,
            task_type,
            priority,
            energy,
            minutes,
            due,
            date,
            start,
            end,
        } => {
            let mut task = Task::new(Uuid::new_v4().to_string(), title)
                .with_priority(priority)
                .with_energy(energy)
                .with_duration(minutes);
            task.description = description;
            task.task_type = task_type;
            task.due_date = due;

            if let (Some(date), Some(start)) = (date, start) {
                schedule_from_args(&mut task, date, start, end)?;
            }

            let tasks = file.load()?;
            let outcome = insert_task(&task, &tasks)?;
            if let InsertionOutcome::Displaced(ref displaced) = outcome {
                println!("Slot was taken; moved overlapping work:");
                super::insert::print_displacement(displaced);
            }
            file.save(outcome.tasks())?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List { date, all, json } => {
            let mut tasks: Vec<Task> = file
                .load()?
                .into_iter()
                .filter(|t| all || !t.completed)
                .filter(|t| date.map_or(true, |d| t.occupies(d).is_some()))
                .collect();
            if date.is_some() {
                tasks.sort_by_key(|t| t.start_time);
            }

            if json {
                return super::print_json(&tasks);
            }
            for t in &tasks {
                let when = match (t.is_scheduled, t.date, t.range()) {
                    (true, Some(d), Some(r)) => format!("{d} {r}"),
                    _ => "unscheduled".to_string(),
                };
                let done = if t.completed { "x" } else { " " };
                println!(
                    "[{done}] {:<36}  {:>4}p {:>3}e {:>4}m  {when:<22}  {}",
                    t.id, t.priority_score, t.estimated_energy_cost, t.time_required, t.title
                );
            }
        }
        TaskAction::Show { id } => {
            let task = file.get(&id)?;
            super::print_json(&task)?;
        }
        TaskAction::Complete { id } => {
            let mut task = file.get(&id)?;
            task.completed = true;
            file.upsert(task)?;
            println!("Task completed: {id}");
        }
        TaskAction::Remove { id } => {
            file.remove(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
