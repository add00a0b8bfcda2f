//! Lunar calendar event types.
//!
//! An [`Event`] is an all-day Gregorian date tagged with the lunar
//! (day, month) it was derived from. Events are produced once by the
//! catalog builder or the custom event parser and never mutated.

use chrono::NaiveDate;

/// A lunar (day, month) annotation carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    pub day: u32,
    pub month: u32,
    /// Whether the "(day/month)" suffix is rendered in the summary
    pub show: bool,
}

impl LunarDate {
    pub fn new(day: u32, month: u32, show: bool) -> Self {
        LunarDate { day, month, show }
    }

    /// Lunar date rendered in the summary
    pub fn shown(day: u32, month: u32) -> Self {
        LunarDate::new(day, month, true)
    }

    /// Lunar date kept out of the summary
    pub fn hidden(day: u32, month: u32) -> Self {
        LunarDate::new(day, month, false)
    }

    /// The (day, month) pair, ignoring `show`
    pub fn key(&self) -> (u32, u32) {
        (self.day, self.month)
    }
}

/// A single all-day calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    pub date: NaiveDate,
    pub lunar_date: LunarDate,
    pub description: String,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        lunar_date: LunarDate,
        description: impl Into<String>,
    ) -> Self {
        Event {
            title: title.into(),
            date,
            lunar_date,
            description: description.into(),
        }
    }

    /// SUMMARY text: the title, suffixed with " (day/month)" when the lunar date is shown.
    pub fn summary(&self) -> String {
        if self.lunar_date.show {
            format!(
                "{} ({}/{})",
                self.title, self.lunar_date.day, self.lunar_date.month
            )
        } else {
            self.title.clone()
        }
    }
}
