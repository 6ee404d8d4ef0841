use chrono::Utc;
use clap::Args;
use schedwise_core::{triage_bonus, Config, TaskFile};

#[derive(Args)]
pub struct TriageArgs {
    /// Print the updated task set as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TriageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let file = TaskFile::open_default()?;
    let tasks = file.load()?;
    let now = Utc::now();

    let bonuses: Vec<(String, i32)> = tasks
        .iter()
        .map(|t| (t.id.clone(), triage_bonus(t, now, &config.policy)))
        .filter(|(_, b)| *b > 0)
        .collect();
    let triaged = schedwise_core::triage(&tasks, now, &config.policy);
    file.save(&triaged)?;

    if args.json {
        return super::print_json(&triaged);
    }

    if bonuses.is_empty() {
        println!("No priority changes.");
    }
    for (id, bonus) in bonuses {
        if let Some(task) = triaged.iter().find(|t| t.id == id) {
            println!("+{bonus:<2} {:>4}  {}  {}", task.priority_score, task.id, task.title);
        }
    }
    Ok(())
}
