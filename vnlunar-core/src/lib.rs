//! Vietnamese lunar calendar events.
//!
//! This crate holds everything the `vnlunar` CLI does apart from argument parsing:
//! - `lunisolar`: single-day Gregorian/lunisolar conversion
//! - `locator`: finding the Gregorian date of a lunar (month, day) in a year
//! - `catalog`: the default holiday events of one year
//! - `custom`: user-specified lunar anniversaries
//! - `generator`: events over a span of years
//! - `ics`: calendar file output

pub mod catalog;
pub mod config;
pub mod constants;
pub mod custom;
pub mod error;
pub mod event;
pub mod generator;
pub mod holidays;
pub mod ics;
pub mod locator;
pub mod lunisolar;
pub mod timezone;

pub use error::{LunarError, LunarResult};
pub use event::{Event, LunarDate};
pub use generator::{Generator, GeneratorConfig};
pub use locator::{LocateOptions, Locator, SearchWindow};
pub use lunisolar::{Astronomical, LunarConverter, LunarDay};
