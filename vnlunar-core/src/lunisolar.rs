//! Vietnamese lunisolar date conversion.
//!
//! Day-granularity conversion between Gregorian dates and the Vietnamese
//! lunisolar calendar. Month boundaries are the local days of the mean new
//! moon (with periodic corrections); the year is anchored on the month that
//! contains the winter solstice (month 11), and in a 13-month year the first
//! month without a principal solar term is the leap month.
//!
//! The offset passed to every conversion is a whole number of hours east of
//! UTC. Different offsets can move a new moon across midnight, so the same
//! Gregorian day can map to different lunar days.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};

/// Julian day number minus `NaiveDate::num_days_from_ce`.
const JD_CE_OFFSET: i64 = 1_721_425;

/// Julian day of the new moon of 1900-01-01 (k = 0).
const NEW_MOON_EPOCH: f64 = 2_415_021.076_998_695;

const SYNODIC_MONTH: f64 = 29.530_588_853;

/// A day in the lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDay {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// True inside the intercalary month of a 13-month year.
    pub is_leap: bool,
}

impl LunarDay {
    pub fn new(day: u32, month: u32, year: i32, is_leap: bool) -> Self {
        LunarDay {
            day,
            month,
            year,
            is_leap,
        }
    }
}

/// Single-day conversion between the Gregorian and lunisolar calendars.
///
/// Implementations must be pure: the same inputs always give the same output.
pub trait LunarConverter {
    /// Lunar day for the Gregorian `date` observed at `utc_offset` hours.
    fn solar_to_lunar(&self, date: NaiveDate, utc_offset: i32) -> LunarDay;

    /// Gregorian date of `lunar`, or `None` when it does not exist
    /// (leap flag on a non-leap month, month outside 1..=12, day outside 1..=30).
    fn lunar_to_solar(&self, lunar: LunarDay, utc_offset: i32) -> Option<NaiveDate>;
}

/// Astronomical converter based on mean new moon and solar longitude series.
#[derive(Debug, Clone, Copy, Default)]
pub struct Astronomical;

impl LunarConverter for Astronomical {
    fn solar_to_lunar(&self, date: NaiveDate, utc_offset: i32) -> LunarDay {
        let tz = f64::from(utc_offset);
        let year = date.year();
        let day_number = julian_day(year, date.month(), date.day());

        let k = ((day_number as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64;
        let mut month_start = new_moon_day(k + 1, tz);
        if month_start > day_number {
            month_start = new_moon_day(k, tz);
        }

        let mut a11 = lunar_month_11(year, tz);
        let mut b11 = a11;
        let mut lunar_year;
        if a11 >= month_start {
            lunar_year = year;
            a11 = lunar_month_11(year - 1, tz);
        } else {
            lunar_year = year + 1;
            b11 = lunar_month_11(year + 1, tz);
        }

        let day = day_number - month_start + 1;
        let diff = (month_start - a11).div_euclid(29);
        let mut is_leap = false;
        let mut month = diff + 11;
        if b11 - a11 > 365 {
            let leap_diff = leap_month_offset(a11, tz);
            if diff >= leap_diff {
                month = diff + 10;
                is_leap = diff == leap_diff;
            }
        }
        if month > 12 {
            month -= 12;
        }
        if month >= 11 && diff < 4 {
            lunar_year -= 1;
        }

        LunarDay {
            day: day as u32,
            month: month as u32,
            year: lunar_year,
            is_leap,
        }
    }

    fn lunar_to_solar(&self, lunar: LunarDay, utc_offset: i32) -> Option<NaiveDate> {
        if !(1..=12).contains(&lunar.month) || !(1..=30).contains(&lunar.day) {
            return None;
        }

        let tz = f64::from(utc_offset);
        let (a11, b11) = if lunar.month < 11 {
            (
                lunar_month_11(lunar.year - 1, tz),
                lunar_month_11(lunar.year, tz),
            )
        } else {
            (
                lunar_month_11(lunar.year, tz),
                lunar_month_11(lunar.year + 1, tz),
            )
        };

        let k = (0.5 + (a11 as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64;
        let mut offset = (i64::from(lunar.month) - 11).rem_euclid(12);

        if b11 - a11 > 365 {
            let leap_offset = leap_month_offset(a11, tz);
            let leap_month = (leap_offset - 2).rem_euclid(12);
            if lunar.is_leap && i64::from(lunar.month) != leap_month {
                return None;
            }
            if lunar.is_leap || offset >= leap_offset {
                offset += 1;
            }
        } else if lunar.is_leap {
            return None;
        }

        let month_start = new_moon_day(k + offset, tz);
        date_from_julian_day(month_start + i64::from(lunar.day) - 1)
    }
}

/// Julian day number of a proleptic Gregorian date.
fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

fn date_from_julian_day(jd: i64) -> Option<NaiveDate> {
    i32::try_from(jd - JD_CE_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Julian date (fractional, UT) of the k-th new moon after 1900-01-01.
fn new_moon(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let dr = PI / 180.0;

    let mut jd1 = 2_415_020.759_33 + 29.530_588_68 * k + 0.000_117_8 * t2 - 0.000_000_155 * t3;
    jd1 += 0.000_33 * ((166.56 + 132.87 * t - 0.009_173 * t2) * dr).sin();

    // Sun's mean anomaly, moon's mean anomaly, moon's argument of latitude
    let m = 359.2242 + 29.105_356_08 * k - 0.000_033_3 * t2 - 0.000_003_47 * t3;
    let mpr = 306.0253 + 385.816_918_06 * k + 0.010_730_6 * t2 + 0.000_012_36 * t3;
    let f = 21.2964 + 390.670_506_46 * k - 0.001_652_8 * t2 - 0.000_002_39 * t3;

    let mut c1 = (0.1734 - 0.000_393 * t) * (m * dr).sin() + 0.0021 * (2.0 * dr * m).sin();
    c1 = c1 - 0.4068 * (mpr * dr).sin() + 0.0161 * (dr * 2.0 * mpr).sin();
    c1 -= 0.0004 * (dr * 3.0 * mpr).sin();
    c1 = c1 + 0.0104 * (dr * 2.0 * f).sin() - 0.0051 * (dr * (m + mpr)).sin();
    c1 = c1 - 0.0074 * (dr * (m - mpr)).sin() + 0.0004 * (dr * (2.0 * f + m)).sin();
    c1 = c1 - 0.0004 * (dr * (2.0 * f - m)).sin() - 0.0006 * (dr * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.0010 * (dr * (2.0 * f - mpr)).sin() + 0.0005 * (dr * (2.0 * mpr + m)).sin();

    let delta_t = if t < -11.0 {
        0.001 + 0.000_839 * t + 0.000_226_1 * t2 - 0.000_008_45 * t3 - 0.000_000_081 * t * t3
    } else {
        -0.000_278 + 0.000_265 * t + 0.000_262 * t2
    };

    jd1 + c1 - delta_t
}

/// Apparent solar longitude in radians, normalized to [0, 2π).
fn sun_longitude(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36525.0;
    let t2 = t * t;
    let dr = PI / 180.0;

    let m = 357.529_10 + 35_999.050_30 * t - 0.000_155_9 * t2 - 0.000_000_48 * t * t2;
    let l0 = 280.466_45 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let mut dl = (1.914_600 - 0.004_817 * t - 0.000_014 * t2) * (dr * m).sin();
    dl += (0.019_993 - 0.000_101 * t) * (dr * 2.0 * m).sin() + 0.000_290 * (dr * 3.0 * m).sin();

    let l = (l0 + dl) * dr;
    l - 2.0 * PI * (l / (2.0 * PI)).floor()
}

/// Which of the 12 principal-term sectors the sun is in at local midnight.
fn sun_sector(day_number: i64, tz: f64) -> i64 {
    (sun_longitude(day_number as f64 - 0.5 - tz / 24.0) / PI * 6.0).floor() as i64
}

/// Local day number containing the k-th new moon.
fn new_moon_day(k: i64, tz: f64) -> i64 {
    (new_moon(k) + 0.5 + tz / 24.0).floor() as i64
}

/// Day number of the start of lunar month 11 (the winter-solstice month) before the end of `year`.
fn lunar_month_11(year: i32, tz: f64) -> i64 {
    let off = julian_day(year, 12, 31) - 2_415_021;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let nm = new_moon_day(k, tz);
    if sun_sector(nm, tz) >= 9 {
        new_moon_day(k - 1, tz)
    } else {
        nm
    }
}

/// Offset (in months after month 11 starting at `a11`) of the leap month.
fn leap_month_offset(a11: i64, tz: f64) -> i64 {
    let k = ((a11 as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH + 0.5).floor() as i64;
    let mut i = 1;
    let mut arc = sun_sector(new_moon_day(k + i, tz), tz);
    loop {
        let last = arc;
        i += 1;
        arc = sun_sector(new_moon_day(k + i, tz), tz);
        if arc == last || i >= 14 {
            break;
        }
    }
    i - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_julian_day_matches_chrono() {
        for d in [date(2000, 1, 1), date(1900, 3, 1), date(2026, 12, 31)] {
            assert_eq!(
                julian_day(d.year(), d.month(), d.day()),
                i64::from(d.num_days_from_ce()) + JD_CE_OFFSET
            );
            assert_eq!(date_from_julian_day(julian_day(d.year(), d.month(), d.day())), Some(d));
        }
        assert_eq!(julian_day(2000, 1, 1), 2_451_545);
    }

    #[test]
    fn test_tet_2026() {
        let lunar = Astronomical.solar_to_lunar(date(2026, 2, 17), 7);
        assert_eq!(lunar, LunarDay::new(1, 1, 2026, false));

        let eve = Astronomical.solar_to_lunar(date(2026, 2, 16), 7);
        assert_eq!((eve.day, eve.month, eve.year), (29, 12, 2025));
    }

    #[test]
    fn test_new_year_day_belongs_to_previous_lunar_year() {
        let lunar = Astronomical.solar_to_lunar(date(2026, 1, 1), 7);
        assert_eq!(lunar, LunarDay::new(13, 11, 2025, false));
    }

    #[test]
    fn test_leap_month_2025() {
        // 2025 has a leap sixth month starting 2025-07-25
        let before = Astronomical.solar_to_lunar(date(2025, 7, 24), 7);
        assert_eq!(before, LunarDay::new(30, 6, 2025, false));

        let leap = Astronomical.solar_to_lunar(date(2025, 7, 25), 7);
        assert_eq!(leap, LunarDay::new(1, 6, 2025, true));

        let after = Astronomical.solar_to_lunar(date(2025, 8, 23), 7);
        assert_eq!(after, LunarDay::new(1, 7, 2025, false));
    }

    #[test]
    fn test_utc_offset_moves_month_boundary() {
        // The new moon of 2027-08-31 falls in the evening UTC, after midnight at +7
        let utc = Astronomical.solar_to_lunar(date(2027, 9, 14), 0);
        let hanoi = Astronomical.solar_to_lunar(date(2027, 9, 14), 7);
        assert_eq!((utc.day, utc.month), (15, 8));
        assert_eq!((hanoi.day, hanoi.month), (14, 8));
    }

    #[test]
    fn test_lunar_to_solar() {
        let cases = [
            (LunarDay::new(1, 1, 2026, false), date(2026, 2, 17)),
            (LunarDay::new(1, 6, 2025, false), date(2025, 6, 25)),
            (LunarDay::new(1, 6, 2025, true), date(2025, 7, 25)),
            (LunarDay::new(1, 7, 2025, false), date(2025, 8, 23)),
            (LunarDay::new(1, 2, 2023, true), date(2023, 3, 22)),
            (LunarDay::new(1, 12, 2025, false), date(2026, 1, 19)),
        ];
        for (lunar, expected) in cases {
            assert_eq!(
                Astronomical.lunar_to_solar(lunar, 7),
                Some(expected),
                "lunar {:?}",
                lunar
            );
        }
    }

    #[test]
    fn test_lunar_to_solar_rejects_invalid_leap_flag() {
        // 2025's leap month is 6, not 5
        assert_eq!(
            Astronomical.lunar_to_solar(LunarDay::new(1, 5, 2025, true), 7),
            None
        );
        // 2026 has no leap month at all
        assert_eq!(
            Astronomical.lunar_to_solar(LunarDay::new(1, 5, 2026, true), 7),
            None
        );
    }

    #[test]
    fn test_lunar_to_solar_rejects_out_of_range() {
        assert_eq!(
            Astronomical.lunar_to_solar(LunarDay::new(1, 13, 2026, false), 7),
            None
        );
        assert_eq!(
            Astronomical.lunar_to_solar(LunarDay::new(31, 1, 2026, false), 7),
            None
        );
    }

    #[test]
    fn test_round_trip_across_year() {
        let mut d = date(2026, 1, 1);
        while d.year() == 2026 {
            let lunar = Astronomical.solar_to_lunar(d, 7);
            assert_eq!(Astronomical.lunar_to_solar(lunar, 7), Some(d), "{d} -> {lunar:?}");
            d = d.succ_opt().unwrap();
        }
    }
}
