//! User-defined lunar events.
//!
//! Custom events are given as a comma-separated list of `day/month:title`
//! (every year of the configured range) or `day/month/year:title`
//! (that year only) entries, e.g. `15/8:My Birthday,4/5/2030:One-off Trip`.

use crate::error::{LunarError, LunarResult};
use crate::event::{Event, LunarDate};
use crate::generator::GeneratorConfig;
use crate::locator::{LocateOptions, Locator};
use crate::lunisolar::LunarConverter;

const EXPECTED_FORMAT: &str = "expected day/month:title or day/month/year:title";

/// When a custom entry occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Every year of the configured range
    Recurring,
    /// Only in the given Gregorian year, regardless of the range
    Once { year: i32 },
}

/// One parsed `datepart:title` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEntry {
    pub day: u32,
    pub month: u32,
    pub occurrence: Occurrence,
    pub title: String,
}

impl CustomEntry {
    fn description(&self) -> String {
        match self.occurrence {
            Occurrence::Recurring => format!(
                "{} - Ngày {} tháng {} âm lịch",
                self.title, self.day, self.month
            ),
            Occurrence::Once { year } => format!(
                "{} - Ngày {} tháng {} năm {} âm lịch",
                self.title, self.day, self.month, year
            ),
        }
    }

    fn event(&self, date: chrono::NaiveDate) -> Event {
        Event::new(
            self.title.clone(),
            date,
            LunarDate::shown(self.day, self.month),
            self.description(),
        )
    }
}

/// Parse a custom event list without locating any dates.
///
/// Empty entries (e.g. from a trailing comma) are skipped. The first
/// malformed entry fails the whole parse.
pub fn parse_entries(input: &str) -> LunarResult<Vec<CustomEntry>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> LunarResult<CustomEntry> {
    let Some((date_part, title)) = entry.split_once(':') else {
        return Err(format_error(format!("invalid format: {entry}, {EXPECTED_FORMAT}")));
    };
    if title.contains(':') {
        return Err(format_error(format!("invalid format: {entry}, {EXPECTED_FORMAT}")));
    }

    let date_part = date_part.trim();
    let title = title.trim();
    if title.is_empty() {
        return Err(format_error(format!(
            "invalid format: {entry}, title cannot be empty"
        )));
    }

    let components: Vec<&str> = date_part.split('/').map(str::trim).collect();
    let (day, month, occurrence) = match components.as_slice() {
        [day, month] => (*day, *month, Occurrence::Recurring),
        [day, month, year] => {
            let year = year.parse::<i32>().map_err(|_| {
                format_error(format!("invalid date: {date_part}, year must be a number"))
            })?;
            (*day, *month, Occurrence::Once { year })
        }
        _ => {
            return Err(format_error(format!(
                "invalid date format: {date_part}, {EXPECTED_FORMAT}"
            )));
        }
    };

    let positive = |s: &str| s.parse::<u32>().ok().filter(|n| *n > 0);
    let (Some(day), Some(month)) = (positive(day), positive(month)) else {
        return Err(format_error(format!(
            "invalid date: {date_part}, day and month must be greater than 0"
        )));
    };

    Ok(CustomEntry {
        day,
        month,
        occurrence,
        title: title.to_string(),
    })
}

fn format_error(message: String) -> LunarError {
    LunarError::Format(message)
}

/// Parse `input` and locate every entry.
///
/// Events come out in entry order; a recurring entry yields one event per
/// year of `config`'s range in ascending order. Years where the lunar date
/// does not occur are skipped.
#[tracing::instrument(skip(locator, config))]
pub fn parse_custom_events<C: LunarConverter>(
    locator: &Locator<C>,
    input: &str,
    config: &GeneratorConfig,
) -> LunarResult<Vec<Event>> {
    let entries = parse_entries(input)?;
    let options = LocateOptions::new(config.timezone.as_str());

    let mut events = Vec::new();
    for entry in &entries {
        match entry.occurrence {
            Occurrence::Recurring => {
                for year in config.years() {
                    if let Some(date) = locator.locate(year, entry.month, entry.day, &options) {
                        events.push(entry.event(date));
                    }
                }
            }
            Occurrence::Once { year } => {
                if let Some(date) = locator.locate(year, entry.month, entry.day, &options) {
                    events.push(entry.event(date));
                }
            }
        }
    }

    tracing::debug!(entries = entries.len(), events = events.len(), "custom events located");
    Ok(events)
}
