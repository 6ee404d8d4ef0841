use chrono::NaiveDate;
use clap::Args;
use schedwise_core::{burnout, completion, focus_distribution, Config, TaskFile};
use serde_json::json;

#[derive(Args)]
pub struct StatsArgs {
    /// Day for the burnout estimate (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tasks = TaskFile::open_default()?.load()?;
    let date = super::target_date(args.date);

    let load = burnout(&tasks, &config.profile, date);
    let done = completion(&tasks);
    let focus = focus_distribution(&tasks);

    if args.json {
        return super::print_json(&json!({
            "burnout": load,
            "completion": done,
            "focus": focus,
        }));
    }

    println!("Burnout risk for {date}: {}%", load.percentage);
    println!("  demand {} / capacity {}", load.demand, load.capacity);
    if load.is_overloaded() {
        println!("  overloaded ({}% of capacity)", load.raw_percentage);
    }
    println!("Completion: {} done, {} pending", done.done, done.pending);
    println!("Focus:");
    for (bucket, count) in &focus {
        println!("  {bucket:<9} {count}");
    }
    Ok(())
}
