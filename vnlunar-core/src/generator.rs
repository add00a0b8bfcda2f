//! Event generation over a span of years.

use std::ops::Range;

use crate::catalog;
use crate::constants::{DEFAULT_TIMEZONE, DEFAULT_YEARS_AHEAD};
use crate::custom;
use crate::error::LunarResult;
use crate::event::Event;
use crate::locator::Locator;
use crate::lunisolar::{Astronomical, LunarConverter};
use crate::timezone::parse_timezone;

/// Immutable generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub start_year: i32,
    pub years_ahead: u32,
    pub timezone: String,
}

impl GeneratorConfig {
    pub fn new(start_year: i32, years_ahead: u32, timezone: impl Into<String>) -> Self {
        GeneratorConfig {
            start_year,
            years_ahead,
            timezone: timezone.into(),
        }
    }

    /// Defaults for everything but the start year.
    pub fn starting(start_year: i32) -> Self {
        GeneratorConfig::new(start_year, DEFAULT_YEARS_AHEAD, DEFAULT_TIMEZONE)
    }

    /// Gregorian years covered: `start_year..start_year + years_ahead`.
    pub fn years(&self) -> Range<i32> {
        let ahead = i32::try_from(self.years_ahead).unwrap_or(i32::MAX);
        self.start_year..self.start_year.saturating_add(ahead)
    }

    /// Last year covered, or `None` when the range is empty.
    pub fn end_year(&self) -> Option<i32> {
        let years = self.years();
        (!years.is_empty()).then(|| years.end - 1)
    }
}

/// Produces the ordered event list for a [`GeneratorConfig`].
pub struct Generator<C = Astronomical> {
    config: GeneratorConfig,
    locator: Locator<C>,
}

impl Generator<Astronomical> {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator::with_converter(config, Astronomical)
    }
}

impl<C: LunarConverter> Generator<C> {
    pub fn with_converter(config: GeneratorConfig, converter: C) -> Self {
        if parse_timezone(&config.timezone).is_none() {
            tracing::info!(
                timezone = %config.timezone,
                "timezone not in the tz database, lunar dates use UTC+7"
            );
        }
        Generator {
            config,
            locator: Locator::new(converter),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate events.
    ///
    /// A non-blank `custom_events` list replaces the default holiday
    /// catalog entirely; see [`custom::parse_custom_events`]. Otherwise the
    /// catalog is built for each year of the range, in ascending order.
    pub fn generate(&self, custom_events: &str) -> LunarResult<Vec<Event>> {
        if !custom_events.trim().is_empty() {
            return custom::parse_custom_events(&self.locator, custom_events, &self.config);
        }

        let events: Vec<Event> = self
            .config
            .years()
            .flat_map(|year| catalog::build_year(&self.locator, year, &self.config.timezone))
            .collect();

        tracing::info!(
            events = events.len(),
            start_year = self.config.start_year,
            years_ahead = self.config.years_ahead,
            "generated default holiday catalog"
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LunarError;
    use chrono::Datelike;
    use std::collections::BTreeSet;

    fn generator(start_year: i32, years_ahead: u32) -> Generator {
        Generator::new(GeneratorConfig::new(start_year, years_ahead, "Asia/Hanoi"))
    }

    #[test]
    fn test_years_range() {
        let config = GeneratorConfig::new(2026, 3, "UTC");
        assert_eq!(config.years().collect::<Vec<_>>(), vec![2026, 2027, 2028]);
        assert_eq!(config.end_year(), Some(2028));

        let empty = GeneratorConfig::new(2026, 0, "UTC");
        assert!(empty.years().is_empty());
        assert_eq!(empty.end_year(), None);
    }

    #[test]
    fn test_starting_defaults() {
        let config = GeneratorConfig::starting(2030);
        assert_eq!(config.years_ahead, 10);
        assert_eq!(config.timezone, "Asia/Hanoi");
    }

    #[test]
    fn test_generates_default_events() {
        let events = generator(2026, 1).generate("").unwrap();
        assert!(!events.is_empty());
        assert_eq!(events[0].title, "Tết Nguyên Đán");
    }

    #[test]
    fn test_spans_exactly_the_configured_years() {
        let events = generator(2026, 2).generate("").unwrap();
        let years: BTreeSet<i32> = events.iter().map(|e| e.date.year()).collect();
        assert_eq!(years, BTreeSet::from([2026, 2027]));
    }

    #[test]
    fn test_years_are_concatenated_in_order() {
        let events = generator(2026, 2).generate("").unwrap();
        let first_2027 = events
            .iter()
            .position(|e| e.date.year() == 2027)
            .unwrap();
        assert!(events[..first_2027].iter().all(|e| e.date.year() == 2026));
        assert!(events[first_2027..].iter().all(|e| e.date.year() == 2027));
        assert_eq!(events[first_2027].title, "Tết Nguyên Đán");
    }

    #[test]
    fn test_custom_events_replace_catalog() {
        let events = generator(2026, 2).generate("15/8:My Birthday").unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.title == "My Birthday"));
    }

    #[test]
    fn test_blank_custom_events_use_catalog() {
        let events = generator(2026, 1).generate("   ").unwrap();
        assert_eq!(events.len(), 17);
    }

    #[test]
    fn test_format_error_propagates() {
        let err = generator(2026, 1).generate("15/:Event").unwrap_err();
        assert!(matches!(err, LunarError::Format(_)));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = generator(2026, 2);
        assert_eq!(generator.generate("").unwrap(), generator.generate("").unwrap());
        assert_eq!(
            generator.generate("1/1:A,15/7/2027:B").unwrap(),
            generator.generate("1/1:A,15/7/2027:B").unwrap()
        );
    }
}
