use chrono::{Datelike, Duration, Local, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A calendar day without time of day or timezone.
///
/// Equality and ordering only ever look at year, month and day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number starting at 1
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn month_value(&self) -> Month {
        Month::from_u32(self.month()).unwrap_or(Month::January)
    }

    /// Continuous month counter, useful to compare (year, month) pairs.
    pub fn month_index(&self) -> i64 {
        self.year() as i64 * 12 + self.month0() as i64
    }

    pub fn same_month(&self, other: &CalendarDate) -> bool {
        self.month_index() == other.month_index()
    }

    pub fn first_of_month(&self) -> Self {
        CalendarDate(self.0 - Duration::days(self.0.day0() as i64))
    }

    pub fn with_day(&self, day: u32) -> Option<Self> {
        self.0.with_day(day).map(CalendarDate)
    }

    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(CalendarDate)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CalendarDate(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?))
    }
}

#[cfg(test)]
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("valid test date")
}
