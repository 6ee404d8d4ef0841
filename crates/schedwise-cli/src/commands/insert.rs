use chrono::NaiveDate;
use clap::Args;
use schedwise_core::{ClockTime, DisplacementOutcome, Task, TaskFile, TimeRange};
use uuid::Uuid;

#[derive(Args)]
pub struct InsertArgs {
    /// Task title
    #[arg(long)]
    pub title: String,
    /// Day (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Start time (HH:MM)
    #[arg(long)]
    pub start: ClockTime,
    /// End time (HH:MM)
    #[arg(long)]
    pub end: ClockTime,
    /// Replace the record with this id instead of creating a new one
    #[arg(long)]
    pub id: Option<String>,
    /// Estimated energy cost
    #[arg(long, default_value = "50")]
    pub energy: i32,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InsertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file = TaskFile::open_default()?;
    let tasks = file.load()?;
    let range = TimeRange::new(args.start, args.end);

    let mut urgent = Task::manual(
        args.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        args.title,
    )
    .with_energy(args.energy)
    .with_schedule(args.date, range);
    // An inverted interval keeps the default and is rejected by validation.
    if let Ok(minutes) = i32::try_from(range.duration_minutes()) {
        if minutes > 0 {
            urgent.time_required = minutes;
        }
    }

    let outcome = schedwise_core::displace(&urgent, &tasks)?;
    file.save(&outcome.tasks)?;

    if args.json {
        return super::print_json(&outcome);
    }
    println!("Inserted {} at {} {range}", urgent.id, args.date);
    print_displacement(&outcome);
    Ok(())
}

pub fn print_displacement(outcome: &DisplacementOutcome) {
    for s in &outcome.shifts {
        println!("  moved {}  {} -> {}", s.task_id, s.from, s.to);
    }
    for id in &outcome.overflowed {
        println!("  unscheduled {id}: no room before midnight");
    }
    if !outcome.is_conflict_free() {
        println!("Warning: shifted tasks now overlap other work:");
        for c in &outcome.secondary_collisions {
            println!("  {} overlaps {}", c.first, c.second);
        }
    }
}
