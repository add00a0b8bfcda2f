//! Lunar date search.
//!
//! Finds the Gregorian date on which a lunar (month, day) falls in a given
//! Gregorian year by scanning the year day by day and asking a
//! [`LunarConverter`] for each day's lunar date. The scan runs left to right
//! through an optional [`SearchWindow`] and stops at the first match, so the
//! earliest matching date wins.

use chrono::NaiveDate;

use crate::constants::DEFAULT_TIMEZONE;
use crate::lunisolar::{Astronomical, LunarConverter};
use crate::timezone::utc_offset_on;

/// Span of Gregorian (month, day) combinations scanned within one year.
///
/// `start_day` only applies to `start_month` and `end_day` only to
/// `end_month`; months in between are scanned from day 1 to 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl SearchWindow {
    pub const FULL_YEAR: SearchWindow = SearchWindow {
        start_month: 1,
        start_day: 1,
        end_month: 12,
        end_day: 31,
    };

    pub fn new(start_month: u32, start_day: u32, end_month: u32, end_day: u32) -> Self {
        SearchWindow {
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    /// Candidate (month, day) pairs in scan order. Impossible days such as
    /// 02-30 are included; the caller drops them.
    fn month_days(self) -> impl Iterator<Item = (u32, u32)> {
        (self.start_month..=self.end_month).flat_map(move |month| {
            let first = if month == self.start_month {
                self.start_day
            } else {
                1
            };
            let last = if month == self.end_month {
                self.end_day
            } else {
                31
            };
            (first..=last).map(move |day| (month, day))
        })
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        SearchWindow::FULL_YEAR
    }
}

/// Options for a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateOptions {
    /// Restricts the scan; `None` scans the whole year
    pub window: Option<SearchWindow>,
    /// IANA timezone name used to pick the conversion offset
    pub timezone: String,
}

impl LocateOptions {
    pub fn new(timezone: impl Into<String>) -> Self {
        LocateOptions {
            window: None,
            timezone: timezone.into(),
        }
    }

    pub fn with_window(mut self, window: SearchWindow) -> Self {
        self.window = Some(window);
        self
    }
}

impl Default for LocateOptions {
    fn default() -> Self {
        LocateOptions::new(DEFAULT_TIMEZONE)
    }
}

/// Searches Gregorian years for lunar dates using a [`LunarConverter`].
#[derive(Debug, Clone, Default)]
pub struct Locator<C = Astronomical> {
    converter: C,
}

impl<C: LunarConverter> Locator<C> {
    pub fn new(converter: C) -> Self {
        Locator { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// First Gregorian date in `year` whose lunar date is `lunar_day`/`lunar_month`.
    ///
    /// Returns `None` when nothing in the window matches, including for
    /// targets that can never match (month 13, day 35).
    pub fn locate(
        &self,
        year: i32,
        lunar_month: u32,
        lunar_day: u32,
        options: &LocateOptions,
    ) -> Option<NaiveDate> {
        let window = options.window.unwrap_or_default();

        let found = window
            .month_days()
            .filter_map(|(month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .find(|date| {
                let offset = utc_offset_on(&options.timezone, *date);
                let lunar = self.converter.solar_to_lunar(*date, offset);
                lunar.month == lunar_month && lunar.day == lunar_day
            });

        match found {
            Some(date) => {
                tracing::debug!(year, lunar_month, lunar_day, %date, "located lunar date")
            }
            None => {
                tracing::debug!(year, lunar_month, lunar_day, "lunar date not found in window")
            }
        }

        found
    }
}

/// [`Locator::locate`] with the default astronomical converter.
pub fn locate(
    year: i32,
    lunar_month: u32,
    lunar_day: u32,
    options: &LocateOptions,
) -> Option<NaiveDate> {
    Locator::<Astronomical>::default().locate(year, lunar_month, lunar_day, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::TET_WINDOW;
    use crate::lunisolar::LunarDay;
    use std::cell::RefCell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Treats every Gregorian day as the lunar day with the same numbers.
    struct MirrorConverter;

    impl LunarConverter for MirrorConverter {
        fn solar_to_lunar(&self, date: NaiveDate, _utc_offset: i32) -> LunarDay {
            use chrono::Datelike;
            LunarDay::new(date.day(), date.month(), date.year(), false)
        }

        fn lunar_to_solar(&self, _lunar: LunarDay, _utc_offset: i32) -> Option<NaiveDate> {
            None
        }
    }

    /// Records every (date, offset) it is asked about.
    #[derive(Default)]
    struct RecordingConverter {
        calls: RefCell<Vec<(NaiveDate, i32)>>,
    }

    impl LunarConverter for RecordingConverter {
        fn solar_to_lunar(&self, date: NaiveDate, utc_offset: i32) -> LunarDay {
            self.calls.borrow_mut().push((date, utc_offset));
            LunarDay::new(0, 0, 0, false)
        }

        fn lunar_to_solar(&self, _lunar: LunarDay, _utc_offset: i32) -> Option<NaiveDate> {
            None
        }
    }

    #[test]
    fn test_locate_holidays_2026() {
        let opts = LocateOptions::default();
        assert_eq!(locate(2026, 1, 1, &opts), Some(date(2026, 2, 17)));
        assert_eq!(locate(2026, 3, 10, &opts), Some(date(2026, 4, 26)));
        assert_eq!(locate(2026, 5, 5, &opts), Some(date(2026, 6, 19)));
        assert_eq!(locate(2026, 7, 15, &opts), Some(date(2026, 8, 27)));
        assert_eq!(locate(2026, 8, 15, &opts), Some(date(2026, 9, 25)));
    }

    #[test]
    fn test_located_date_converts_back_to_target() {
        let opts = LocateOptions::default();
        for month in 1..=12 {
            for day in [1, 10, 15, 29] {
                if let Some(found) = locate(2026, month, day, &opts) {
                    let lunar = Astronomical.solar_to_lunar(found, 7);
                    assert_eq!(
                        (lunar.month, lunar.day),
                        (month, day),
                        "located {found} for {day}/{month}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_invalid_lunar_month_not_found() {
        let opts = LocateOptions::default();
        assert_eq!(locate(2026, 13, 1, &opts), None);
        assert_eq!(locate(2030, 0, 1, &opts), None);
    }

    #[test]
    fn test_invalid_lunar_day_not_found() {
        assert_eq!(locate(2026, 10, 35, &LocateOptions::default()), None);
    }

    #[test]
    fn test_window_containing_match() {
        let opts = LocateOptions::default().with_window(TET_WINDOW);
        assert_eq!(locate(2026, 1, 1, &opts), Some(date(2026, 2, 17)));
    }

    #[test]
    fn test_window_excluding_match() {
        let opts = LocateOptions::default().with_window(SearchWindow::new(1, 21, 2, 10));
        assert_eq!(locate(2026, 1, 1, &opts), None);
    }

    #[test]
    fn test_earliest_match_wins() {
        // Lunar 1/12 occurs in January 2026 (of lunar year 2025) and again in January 2027
        let opts = LocateOptions::default();
        assert_eq!(locate(2026, 12, 1, &opts), Some(date(2026, 1, 19)));
    }

    #[test]
    fn test_no_match_when_month_starts_outside_year() {
        // Lunar month 12 of 2024 began on 2024-12-31 and that of 2025 begins in 2026
        assert_eq!(locate(2025, 12, 1, &LocateOptions::default()), None);
    }

    #[test]
    fn test_timezone_changes_result() {
        let utc = LocateOptions::new("UTC");
        let hanoi = LocateOptions::new("Asia/Ho_Chi_Minh");
        assert_eq!(locate(2027, 8, 15, &utc), Some(date(2027, 9, 14)));
        assert_eq!(locate(2027, 8, 15, &hanoi), Some(date(2027, 9, 15)));
    }

    #[test]
    fn test_unknown_timezone_uses_utc_plus_7() {
        let unknown = LocateOptions::new("Asia/Hanoi");
        let hanoi = LocateOptions::new("Asia/Ho_Chi_Minh");
        assert_eq!(locate(2027, 8, 15, &unknown), locate(2027, 8, 15, &hanoi));
    }

    #[test]
    fn test_impossible_gregorian_days_are_skipped() {
        let locator = Locator::new(MirrorConverter);
        let opts = LocateOptions::default();
        assert_eq!(locator.locate(2026, 2, 30, &opts), None);
        assert_eq!(locator.locate(2026, 4, 31, &opts), None);
        assert_eq!(locator.locate(2024, 2, 29, &opts), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let locator = Locator::new(MirrorConverter);
        let opts = LocateOptions::default().with_window(SearchWindow::new(3, 5, 3, 9));
        assert_eq!(locator.locate(2026, 3, 5, &opts), Some(date(2026, 3, 5)));
        assert_eq!(locator.locate(2026, 3, 9, &opts), Some(date(2026, 3, 9)));
        assert_eq!(locator.locate(2026, 3, 4, &opts), None);
        assert_eq!(locator.locate(2026, 3, 10, &opts), None);
    }

    #[test]
    fn test_scan_order_and_offset() {
        let locator = Locator::new(RecordingConverter::default());
        let opts =
            LocateOptions::new("America/New_York").with_window(SearchWindow::new(1, 30, 2, 2));
        assert_eq!(locator.locate(2026, 1, 1, &opts), None);

        let calls = locator.converter().calls.borrow();
        assert_eq!(
            *calls,
            vec![
                (date(2026, 1, 30), -5),
                (date(2026, 1, 31), -5),
                (date(2026, 2, 1), -5),
                (date(2026, 2, 2), -5),
            ]
        );
    }

    #[test]
    fn test_full_year_scan_is_bounded() {
        let locator = Locator::new(RecordingConverter::default());
        assert_eq!(locator.locate(2024, 1, 1, &LocateOptions::default()), None);
        assert_eq!(locator.converter().calls.borrow().len(), 366);
    }
}
