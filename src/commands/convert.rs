use anyhow::{Context, Result};
use chrono::NaiveDate;
use vnlunar_core::lunisolar::{Astronomical, LunarConverter, LunarDay};
use vnlunar_core::timezone::utc_offset_on;

pub fn to_lunar(date: NaiveDate, timezone: &str) -> Result<()> {
    println!("{}", format_lunar(&solar_to_lunar(date, timezone)));
    Ok(())
}

pub fn to_solar(date: &str, leap: bool, timezone: &str) -> Result<()> {
    let (day, month, year) = parse_lunar(date)?;
    let solar = lunar_to_solar(LunarDay::new(day, month, year, leap), timezone)
        .with_context(|| {
            let leap = if leap { "leap " } else { "" };
            format!("{day}/{month}/{year} is not a valid {leap}lunar date")
        })?;

    println!("{}", solar.format("%Y-%m-%d"));
    Ok(())
}

fn solar_to_lunar(date: NaiveDate, timezone: &str) -> LunarDay {
    Astronomical.solar_to_lunar(date, utc_offset_on(timezone, date))
}

/// The offset is taken on the lunar year's Gregorian counterpart, mid-year,
/// since the target date is not known yet.
fn lunar_to_solar(lunar: LunarDay, timezone: &str) -> Option<NaiveDate> {
    let reference = NaiveDate::from_ymd_opt(lunar.year, 7, 1)?;
    Astronomical.lunar_to_solar(lunar, utc_offset_on(timezone, reference))
}

fn format_lunar(lunar: &LunarDay) -> String {
    let mut text = format!("{}/{}/{}", lunar.day, lunar.month, lunar.year);
    if lunar.is_leap {
        text.push_str(" (leap)");
    }
    text
}

fn parse_lunar(date: &str) -> Result<(u32, u32, i32)> {
    let parts: Vec<&str> = date.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        anyhow::bail!("invalid lunar date: {date}, expected day/month/year");
    };

    let day: u32 = day
        .parse()
        .with_context(|| format!("invalid lunar date: {date}, day must be a number"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid lunar date: {date}, month must be a number"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid lunar date: {date}, year must be a number"))?;

    Ok((day, month, year))
}
