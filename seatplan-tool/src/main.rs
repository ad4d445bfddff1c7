mod config;
mod error;
mod logging;
mod report;

#[cfg(feature = "editor")]
mod editor;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{load_config, load_plan, resolve_settings};
use crate::report::ReportFormat;

#[derive(Parser)]
#[command(name = "seats")]
#[command(about = "Drag-and-drop seating chart editor", long_about = None)]
struct Cli {
    /// Floor plan TOML (default: built-in office layout)
    #[arg(long, global = true)]
    plan: Option<PathBuf>,

    /// Write logs to this file (filter with SEATS_LOG)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Leave the office pet out
    #[arg(long, global = true)]
    no_pet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[cfg(feature = "editor")]
    /// Open the interactive editor
    Edit,

    /// Print the chart of the loaded plan
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Validate a floor plan and print a summary
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = resolve_settings(load_config(), cli.plan, cli.log, cli.no_pet);
    logging::init(settings.log_file.as_deref())?;

    let mut plan = load_plan(settings.plan.as_deref())?;
    if !settings.pet {
        plan = plan.without_pet();
    }
    let chart = plan.into_chart()?;
    info!(
        plan = ?settings.plan,
        employees = chart.roster().len(),
        seats = chart.directory().len(),
        "floor plan loaded"
    );

    match cli.command {
        #[cfg(feature = "editor")]
        Command::Edit => {
            editor::run(chart)?;
        }
        Command::Show { format } => {
            print!("{}", report::render(&chart, format)?);
        }
        Command::Check => {
            println!("{}", report::summary(&chart));
        }
    }

    Ok(())
}
