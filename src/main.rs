mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "vnlunar")]
#[command(about = "Generate an ICS calendar of Vietnamese lunar holidays and anniversaries")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    /// Config file to read instead of ~/.config/vnlunar/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the ICS file (the default when no command is given)
    Generate(GenerateArgs),
    /// Convert a single date between the Gregorian and lunar calendars
    Convert {
        #[command(subcommand)]
        direction: Convert,
    },
    /// Write a commented config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the config file path and the effective settings
    Config,
}

#[derive(Subcommand)]
enum Convert {
    /// Gregorian date (YYYY-MM-DD) to lunar day/month/year
    ToLunar {
        date: NaiveDate,

        /// Timezone used to decide which day a new moon falls on
        #[arg(short, long)]
        timezone: Option<String>,
    },
    /// Lunar date (day/month/year) to Gregorian YYYY-MM-DD
    ToSolar {
        date: String,

        /// The date is in the leap month of its year
        #[arg(long)]
        leap: bool,

        /// Timezone used to decide which day a new moon falls on
        #[arg(short, long)]
        timezone: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        None => commands::generate::run(config_path, cli.generate),
        Some(Commands::Generate(args)) => commands::generate::run(config_path, args),
        Some(Commands::Convert { direction }) => {
            let settings = commands::load_settings(config_path)?;
            match direction {
                Convert::ToLunar { date, timezone } => {
                    let timezone = timezone.unwrap_or(settings.timezone);
                    commands::convert::to_lunar(date, &timezone)
                }
                Convert::ToSolar {
                    date,
                    leap,
                    timezone,
                } => {
                    let timezone = timezone.unwrap_or(settings.timezone);
                    commands::convert::to_solar(&date, leap, &timezone)
                }
            }
        }
        Some(Commands::InitConfig { force }) => commands::config::init(config_path, force),
        Some(Commands::Config) => commands::config::show(config_path),
    }
}
