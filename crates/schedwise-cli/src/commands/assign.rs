use chrono::{NaiveDate, Utc};
use clap::Args;
use schedwise_core::{AssignmentOutcome, Config, Planner, SkipReason, TaskFile};

#[derive(Args)]
pub struct AssignArgs {
    /// Day to fill (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
    /// Compute without writing tasks or the remaining budget back
    #[arg(long)]
    pub dry_run: bool,
}

/// Assign only, or triage then assign when `with_triage` is set.
pub fn run(args: AssignArgs, with_triage: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let file = TaskFile::open_default()?;
    let tasks = file.load()?;
    let date = super::target_date(args.date);
    let planner = Planner::with_policy(config.policy.clone());

    let outcome = if with_triage {
        planner.auto_schedule(&tasks, &config.profile, date, Utc::now())?
    } else {
        planner.assign(&tasks, &config.profile, date)?
    };

    if !args.dry_run {
        file.save(&outcome.tasks)?;
        config.profile.remaining_energy = outcome.remaining_energy;
        config.save()?;
    }

    if args.json {
        return super::print_json(&outcome);
    }
    print_outcome(&outcome, date);
    Ok(())
}

fn print_outcome(outcome: &AssignmentOutcome, date: NaiveDate) {
    println!("Plan for {date}");
    if outcome.placements.is_empty() {
        println!("  nothing placed");
    }
    for p in &outcome.placements {
        let title = outcome
            .tasks
            .iter()
            .find(|t| t.id == p.task_id)
            .map_or("", |t| t.title.as_str());
        println!("  {}  {title}  (energy {}, cost {})", p.range, p.fit_score, p.energy_cost);
    }

    if !outcome.skipped.is_empty() {
        println!("Skipped:");
        for s in &outcome.skipped {
            let why = match &s.reason {
                SkipReason::InsufficientEnergy { cost, available } => {
                    format!("needs {cost} energy, {available} left")
                }
                SkipReason::NoViableSlot => "no free slot with enough energy".to_string(),
            };
            println!("  {}  {why}", s.task_id);
        }
    }
    println!("Remaining energy: {}", outcome.remaining_energy);
}
