//! Maruzzella CLI - migrations, seeding, exports and state files.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! mz-cli migrate
//!
//! # Write the default staff list (refuses to overwrite without --force)
//! mz-cli seed --force
//!
//! # Export this week's payroll summary for the kitchen
//! mz-cli export payroll --department kitchen
//!
//! # Back up and restore the whole state
//! mz-cli state dump --output backup.json
//! mz-cli state import backup.json
//! ```
//!
//! Commands use the same environment as the server: `MARUZZELLA_DATABASE_URL`
//! selects `PostgreSQL`, otherwise `MARUZZELLA_DATA_FILE` is used.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use maruzzella_core::model::WeekKey;
use maruzzella_core::types::Department;

mod commands;

#[derive(Parser)]
#[command(name = "mz-cli")]
#[command(author, version, about = "Maruzzella CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Write the default staff list and empty rosters
    Seed {
        /// Overwrite existing state
        #[arg(long)]
        force: bool,
    },
    /// Export CSV files
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Dump, import or merge state files
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Weekly payroll summary
    Payroll {
        /// Department (`kitchen`, `foh`, `stewarding`)
        #[arg(short, long, default_value = "kitchen")]
        department: Department,

        /// Output file (defaults to the download name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Roster grid for one week
    Roster {
        /// Week (`current` or `next`)
        #[arg(short, long, default_value = "current")]
        week: WeekKey,

        /// Department (`kitchen`, `foh`, `stewarding`)
        #[arg(short, long, default_value = "kitchen")]
        department: Department,

        /// Output file (defaults to the download name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print or save the whole state as JSON
    Dump {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored state with a data file
    Import {
        /// Data file with employees, rosters and timeLogs
        file: PathBuf,
    },
    /// Add time logs the store does not have yet
    MergeLogs {
        /// Data file or bare array of time logs
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { force } => commands::seed::run(force).await?,
        Commands::Export { target } => match target {
            ExportTarget::Payroll { department, output } => {
                commands::export::payroll(department, output).await?;
            }
            ExportTarget::Roster {
                week,
                department,
                output,
            } => commands::export::roster(week, department, output).await?,
        },
        Commands::State { action } => match action {
            StateAction::Dump { output } => commands::state::dump(output).await?,
            StateAction::Import { file } => commands::state::import(&file).await?,
            StateAction::MergeLogs { file } => commands::state::merge_logs(&file).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_roster_export() {
        let cli = Cli::try_parse_from(["mz-cli", "export", "roster", "--week", "next"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Export {
                target: ExportTarget::Roster {
                    week: WeekKey::NextWeek,
                    department: Department::Kitchen,
                    output: None,
                }
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_department() {
        assert!(Cli::try_parse_from(["mz-cli", "export", "payroll", "-d", "bar"]).is_err());
    }
}
