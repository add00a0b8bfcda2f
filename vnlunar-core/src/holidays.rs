//! Named Vietnamese lunar holidays.

use crate::locator::SearchWindow;

/// A holiday fixed to a lunar (month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedAnniversary {
    pub day: u32,
    pub month: u32,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TET: NamedAnniversary = NamedAnniversary {
    day: 1,
    month: 1,
    title: "Tết Nguyên Đán",
    description: "Tết Nguyên Đán - Vietnamese Lunar New Year",
};

/// Always 14 days after Tết; derived from it rather than searched.
pub const TET_THUONG_NGUYEN: NamedAnniversary = NamedAnniversary {
    day: 15,
    month: 1,
    title: "Tết Thượng Nguyên",
    description: "Tết Thượng Nguyên - Rằm tháng Giêng",
};

pub const HUNG_KINGS_COMMEMORATION: NamedAnniversary = NamedAnniversary {
    day: 10,
    month: 3,
    title: "Giỗ Tổ Hùng Vương",
    description: "Giỗ Tổ Hùng Vương",
};

pub const DOAN_NGO: NamedAnniversary = NamedAnniversary {
    day: 5,
    month: 5,
    title: "Tết Đoan Ngọ",
    description: "Tết Đoan Ngọ - Mùng 5 tháng 5",
};

pub const VU_LAN: NamedAnniversary = NamedAnniversary {
    day: 15,
    month: 7,
    title: "Vu Lan",
    description: "Vu Lan - Rằm tháng 7",
};

pub const TRUNG_THU: NamedAnniversary = NamedAnniversary {
    day: 15,
    month: 8,
    title: "Tết Trung Thu",
    description: "Tết Trung Thu - Rằm tháng 8",
};

/// Holidays searched over the full year, in output order (after Tết).
pub const SEARCHED_HOLIDAYS: [NamedAnniversary; 4] =
    [HUNG_KINGS_COMMEMORATION, DOAN_NGO, VU_LAN, TRUNG_THU];

/// Tết always falls between 21 January and 20 February.
pub const TET_WINDOW: SearchWindow = SearchWindow {
    start_month: 1,
    start_day: 21,
    end_month: 2,
    end_day: 20,
};

/// Days from Tết to Tết Thượng Nguyên.
pub const TET_THUONG_NGUYEN_OFFSET_DAYS: u64 = 14;

/// Title of the first-day-of-month filler event.
pub fn first_day_title(month: u32) -> String {
    format!("Mùng 1 Tháng {month} (Âm lịch)")
}

/// Description of the first-day-of-month filler event.
pub fn first_day_description(month: u32) -> String {
    format!("Mùng 1 tháng {month} âm lịch")
}
