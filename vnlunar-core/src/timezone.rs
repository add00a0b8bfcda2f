//! Timezone name resolution to whole-hour UTC offsets.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::constants::FALLBACK_UTC_OFFSET;

/// A day's offset is taken at local noon so the lookup is never on a
/// midnight DST boundary.
const NOON: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(t) => t,
    None => panic!("noon is a valid time"),
};

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// UTC offset in whole hours for `tz_name` at the local time `at`.
///
/// Fractional-hour zones round to the nearest hour. Names that are not in the
/// tz database resolve to [`FALLBACK_UTC_OFFSET`].
pub fn resolve_utc_offset(tz_name: &str, at: NaiveDateTime) -> i32 {
    let Some(tz) = parse_timezone(tz_name) else {
        return FALLBACK_UTC_OFFSET;
    };

    let offset = match tz.from_local_datetime(&at).earliest() {
        Some(local) => local.offset().fix(),
        // Local time skipped by a DST transition
        None => tz.offset_from_utc_datetime(&at).fix(),
    };

    (f64::from(offset.local_minus_utc()) / 3600.0).round() as i32
}

/// UTC offset in whole hours in force on `date` in `tz_name`.
pub fn utc_offset_on(tz_name: &str, date: NaiveDate) -> i32 {
    resolve_utc_offset(tz_name, NaiveDateTime::new(date, NOON))
}
