use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Args;
use owo_colors::OwoColorize;
use vnlunar_core::config::Settings;
use vnlunar_core::ics::{CalendarMetadata, generate_ics, write_ics};
use vnlunar_core::{Generator, GeneratorConfig};

/// Flags that override the configured settings for one run.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Number of years to generate [default: 10]
    #[arg(long)]
    pub years: Option<u32>,

    /// Output ICS file path [default: vietnamese-lunar-calendar.ics]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Custom lunar events, comma-separated: 'day/month:title' (every year)
    /// or 'day/month/year:title' (that year only)
    #[arg(short, long)]
    pub events: Option<String>,

    /// Timezone for lunar date calculation [default: Asia/Hanoi]
    #[arg(short, long)]
    pub timezone: Option<String>,

    /// First year to generate [default: current year]
    #[arg(long)]
    pub start_year: Option<i32>,
}

impl GenerateArgs {
    fn apply(self, settings: &mut Settings) {
        if let Some(years) = self.years {
            settings.years = years;
        }
        if let Some(output) = self.output {
            settings.output = output;
        }
        if let Some(events) = self.events {
            settings.events = events;
        }
        if let Some(timezone) = self.timezone {
            settings.timezone = timezone;
        }
        if self.start_year.is_some() {
            settings.start_year = self.start_year;
        }
    }
}

pub fn run(config_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let mut settings = super::load_settings(config_path)?;
    args.apply(&mut settings);

    let config = settings.generator_config(Local::now().year());
    let generator = Generator::new(config.clone());
    let events = generator
        .generate(&settings.events)
        .context("Failed to generate events")?;

    let content = generate_ics(&events, &CalendarMetadata::new(config.timezone.as_str()));
    let output = settings.output_path();
    write_ics(&output, &content)
        .with_context(|| format!("Failed to write ICS file {}", output.display()))?;
    tracing::info!(path = %output.display(), bytes = content.len(), "wrote calendar");

    println!("{} {}", "✓".green(), summary(events.len(), &config, &output));
    Ok(())
}

fn summary(event_count: usize, config: &GeneratorConfig, output: &Path) -> String {
    let end_year = config.end_year().unwrap_or(config.start_year);
    format!(
        "Generated ICS file with {} events for years {}-{} to {}",
        event_count,
        config.start_year,
        end_year,
        output.display()
    )
}
