//! ICS file generation.
//!
//! This module writes generated events as an RFC 5545 calendar of all-day events.

mod generate;

pub use generate::{CalendarMetadata, event_uid, generate_ics, write_ics};
