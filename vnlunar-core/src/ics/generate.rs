//! ICS file generation.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::constants::{CALENDAR_NAME, PRODID};
use crate::error::LunarResult;
use crate::event::Event;

/// Calendar-level properties of a generated file.
#[derive(Debug, Clone)]
pub struct CalendarMetadata {
    /// X-WR-CALNAME
    pub name: String,
    /// X-WR-TIMEZONE
    pub timezone: String,
    /// DTSTAMP of every event
    pub generated_at: DateTime<Utc>,
}

impl CalendarMetadata {
    pub fn new(timezone: impl Into<String>) -> Self {
        CalendarMetadata {
            name: CALENDAR_NAME.to_string(),
            timezone: timezone.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Generate a VCALENDAR with one all-day VEVENT per event, in order.
pub fn generate_ics(events: &[Event], metadata: &CalendarMetadata) -> String {
    let mut cal = Calendar::new();
    cal.name(&metadata.name);
    cal.timezone(metadata.timezone.as_str());

    // Note: the icalendar crate stamps each event itself; overwrite so output
    // only depends on the metadata
    let dtstamp = metadata
        .generated_at
        .format("%Y%m%dT%H%M%SZ")
        .to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event_uid(event));
        ics_event.add_property("DTSTAMP", &dtstamp);
        add_date_property(&mut ics_event, "DTSTART", event.date);
        add_date_property(&mut ics_event, "DTEND", event.date);
        ics_event.summary(&event.summary());
        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        ics_event.add_property("STATUS", "CONFIRMED");
        cal.push(ics_event.done());
    }

    finalize_calendar(&cal.done().to_string())
}

/// Write generated calendar content, creating parent directories as needed.
pub fn write_ics(path: &Path, content: &str) -> LunarResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Deterministic UID from the title and date.
pub fn event_uid(event: &Event) -> String {
    format!(
        "vnlunar-{}-{}@lunar-calendar",
        slug::slugify(&event.title),
        event.date.format("%Y%m%d")
    )
}

/// Rewrite the calendar header of the icalendar crate's output:
/// - Replace PRODID with ours
/// - Add METHOD:PUBLISH
/// - Drop the non-standard NAME line; X-WR-CALNAME carries the name
fn finalize_calendar(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);

    for line in ics.lines() {
        if line.starts_with("NAME:") {
            continue;
        }

        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\nMETHOD:PUBLISH\r\n");
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
