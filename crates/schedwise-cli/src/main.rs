use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "schedwise", version, about = "Energy-aware personal task scheduler")]
struct Cli {
    /// Log scheduling decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Re-score unscheduled tasks for staleness and deadlines
    Triage(commands::triage::TriageArgs),
    /// Place unscheduled tasks into a day by energy fit
    Assign(commands::assign::AssignArgs),
    /// Triage, then assign
    Plan(commands::assign::AssignArgs),
    /// Force an urgent task into a slot, pushing overlapped work later
    Insert(commands::insert::InsertArgs),
    /// Energy profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Burnout, completion and focus statistics
    Stats(commands::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Triage(args) => commands::triage::run(args),
        Commands::Assign(args) => commands::assign::run(args, false),
        Commands::Plan(args) => commands::assign::run(args, true),
        Commands::Insert(args) => commands::insert::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats(args) => commands::stats::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_with_date_and_json() {
        let cli = Cli::try_parse_from(["schedwise", "plan", "--date", "2026-03-02", "--json"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.date.map(|d| d.to_string()).as_deref(), Some("2026-03-02"));
                assert!(args.json);
            }
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["schedwise", "triage", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn insert_requires_interval() {
        assert!(Cli::try_parse_from(["schedwise", "insert", "--title", "call"]).is_err());
        let cli = Cli::try_parse_from([
            "schedwise", "insert", "--title", "call", "--date", "2026-03-02", "--start", "10:00",
            "--end", "11:00",
        ])
        .unwrap();
        match cli.command {
            Commands::Insert(args) => {
                assert_eq!(args.start.to_string(), "10:00");
                assert_eq!(args.end.to_string(), "11:00");
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn rejects_malformed_clock_time() {
        assert!(Cli::try_parse_from([
            "schedwise", "insert", "--title", "call", "--date", "2026-03-02", "--start", "9am",
            "--end", "11:00",
        ])
        .is_err());
    }

    #[test]
    fn task_add_defaults_match_manual_entry() {
        let cli = Cli::try_parse_from(["schedwise", "task", "add", "write report"]).unwrap();
        match cli.command {
            Commands::Task {
                action:
                    commands::task::TaskAction::Add {
                        priority,
                        energy,
                        minutes,
                        ..
                    },
            } => {
                assert_eq!((priority, energy, minutes), (50, 50, 60));
            }
            _ => panic!("expected task add"),
        }
    }

    #[test]
    fn profile_preset_parses_name() {
        let cli = Cli::try_parse_from(["schedwise", "profile", "preset", "owl"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Profile {
                action: commands::profile::ProfileAction::Preset { preset: schedwise_core::EnergyPreset::Owl }
            }
        ));
        assert!(Cli::try_parse_from(["schedwise", "profile", "preset", "vampire"]).is_err());
    }
}
