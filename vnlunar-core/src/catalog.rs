//! Default holiday catalog for one Gregorian year.
//!
//! Produces the named holidays followed by a "first day of lunar month"
//! event for every lunar month whose first day is not already a holiday.

use std::collections::HashSet;

use chrono::Days;

use crate::event::{Event, LunarDate};
use crate::holidays::{
    self, NamedAnniversary, SEARCHED_HOLIDAYS, TET, TET_THUONG_NGUYEN,
    TET_THUONG_NGUYEN_OFFSET_DAYS, TET_WINDOW,
};
use crate::locator::{LocateOptions, Locator};
use crate::lunisolar::LunarConverter;

/// Build the holiday events for `year`.
///
/// Order: Tết, Tết Thượng Nguyên, Giỗ Tổ Hùng Vương, Tết Đoan Ngọ, Vu Lan,
/// Tết Trung Thu, then first-day-of-month events by ascending lunar month.
/// A holiday or month that cannot be located in `year` is left out.
#[tracing::instrument(skip(locator))]
pub fn build_year<C: LunarConverter>(
    locator: &Locator<C>,
    year: i32,
    timezone: &str,
) -> Vec<Event> {
    let full_year = LocateOptions::new(timezone);
    let mut events = Vec::with_capacity(18);

    let tet_options = full_year.clone().with_window(TET_WINDOW);
    if let Some(tet) = locator.locate(year, TET.month, TET.day, &tet_options) {
        events.push(holiday_event(&TET, tet));

        match tet.checked_add_days(Days::new(TET_THUONG_NGUYEN_OFFSET_DAYS)) {
            Some(date) => events.push(holiday_event(&TET_THUONG_NGUYEN, date)),
            None => {
                tracing::warn!(year, "Tết Thượng Nguyên is out of the supported date range")
            }
        }
    } else {
        tracing::warn!(year, "Tết not found in its search window");
    }

    for holiday in &SEARCHED_HOLIDAYS {
        if let Some(date) = locator.locate(year, holiday.month, holiday.day, &full_year) {
            events.push(holiday_event(holiday, date));
        }
    }

    let claimed: HashSet<(u32, u32)> = events.iter().map(|e| e.lunar_date.key()).collect();
    events.extend(first_days_of_months(locator, year, &full_year, &claimed));

    events
}

fn holiday_event(holiday: &NamedAnniversary, date: chrono::NaiveDate) -> Event {
    Event::new(
        holiday.title,
        date,
        LunarDate::shown(holiday.day, holiday.month),
        holiday.description,
    )
}

/// First-day events for lunar months 1..=12, skipping (1, month) pairs in `claimed`.
fn first_days_of_months<C: LunarConverter>(
    locator: &Locator<C>,
    year: i32,
    options: &LocateOptions,
    claimed: &HashSet<(u32, u32)>,
) -> Vec<Event> {
    (1..=12)
        .filter(|month| {
            let taken = claimed.contains(&(1, *month));
            if taken {
                tracing::debug!(year, month, "first day already covered by a holiday");
            }
            !taken
        })
        .filter_map(|month| {
            let date = locator.locate(year, month, 1, options)?;
            Some(Event::new(
                holidays::first_day_title(month),
                date,
                LunarDate::hidden(1, month),
                holidays::first_day_description(month),
            ))
        })
        .collect()
}
