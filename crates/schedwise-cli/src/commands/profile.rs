//! Energy profile commands.

use clap::Subcommand;
use schedwise_core::{Config, EnergyPreset, EnergyProfile};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the energy curve, window and budget
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the curve with a chronotype preset (lark, owl, balanced)
    Preset { preset: EnergyPreset },
    /// Set the energy level (0-100) for one hour
    SetHour { hour: usize, value: i32 },
    /// Set the schedulable window [start, end)
    Window { start: u32, end: u32 },
    /// Set the energy budget for the next planning run
    Budget { amount: i32 },
    /// Restore the default profile
    Reset,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Show { json } => {
            if json {
                return super::print_json(&config.profile);
            }
            show(&config.profile);
            return Ok(());
        }
        ProfileAction::Preset { preset } => {
            config.profile.apply_preset(preset);
            println!("Applied {preset} curve");
        }
        ProfileAction::SetHour { hour, value } => {
            config.profile.set_hour(hour, value)?;
            println!("{hour:02}:00 -> {value}");
        }
        ProfileAction::Window { start, end } => {
            let updated = config.profile.clone().with_window(start, end);
            updated.validate()?;
            config.profile = updated;
            println!("Window {start:02}:00-{end:02}:00");
        }
        ProfileAction::Budget { amount } => {
            config.profile.remaining_energy = amount;
            println!("Budget {amount}");
        }
        ProfileAction::Reset => {
            config.profile = EnergyProfile::default();
            println!("profile reset to defaults");
        }
    }

    config.save()?;
    Ok(())
}

fn show(profile: &EnergyProfile) {
    println!("{}", profile.render_ascii_chart());
    println!(
        "Window: {:02}:00-{:02}:00",
        profile.start_hour, profile.end_hour
    );
    println!("Remaining energy: {}", profile.remaining_energy);
    let peaks: Vec<String> = profile
        .peak_hours(3)
        .iter()
        .map(|h| format!("{h:02}:00"))
        .collect();
    println!("Peak hours: {}", peaks.join(", "));
}
