//! Shared defaults.

/// Timezone used when none is configured.
///
/// Not a tz database name; it resolves through the fallback offset.
pub const DEFAULT_TIMEZONE: &str = "Asia/Hanoi";

/// UTC offset (hours) used when a timezone name cannot be resolved.
pub const FALLBACK_UTC_OFFSET: i32 = 7;

/// Number of years generated when none is configured.
pub const DEFAULT_YEARS_AHEAD: u32 = 10;

/// Output path used when none is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "vietnamese-lunar-calendar.ics";

/// Calendar name written to X-WR-CALNAME.
pub const CALENDAR_NAME: &str = "Vietnamese Lunar Calendar";

/// PRODID written to the generated calendar.
pub const PRODID: &str = "-//Vietnamese Lunar Calendar//EN";
