use chrono::Weekday;
use std::collections::BTreeSet;
use std::ops::{Bound, RangeBounds};

use crate::date::CalendarDate;

/// Converts a 0 (Sunday) to 6 (Saturday) day number into a weekday.
/// Larger values wrap around.
pub fn weekday_from_sunday0(n: u32) -> Weekday {
    (0..n % 7).fold(Weekday::Sun, |day, _| day.succ())
}

/// Which days may be picked and how weeks are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraints {
    pub start: Bound<CalendarDate>,
    pub end: Bound<CalendarDate>,
    pub disabled: BTreeSet<CalendarDate>,
    pub week_start: Weekday,
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
            disabled: BTreeSet::new(),
            week_start: Weekday::Mon,
        }
    }
}

impl Constraints {
    pub fn with_start(mut self, start: Option<CalendarDate>) -> Self {
        self.set_start(start);
        self
    }

    pub fn with_end(mut self, end: Option<CalendarDate>) -> Self {
        self.set_end(end);
        self
    }

    pub fn with_disabled<I: IntoIterator<Item = CalendarDate>>(mut self, dates: I) -> Self {
        self.set_disabled(dates);
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn set_start(&mut self, start: Option<CalendarDate>) {
        self.start = start.map_or(Bound::Unbounded, Bound::Included);
    }

    pub fn set_end(&mut self, end: Option<CalendarDate>) {
        self.end = end.map_or(Bound::Unbounded, Bound::Included);
    }

    pub fn set_disabled<I: IntoIterator<Item = CalendarDate>>(&mut self, dates: I) {
        self.disabled = dates.into_iter().collect();
    }

    pub fn start_date(&self) -> Option<CalendarDate> {
        bound_date(&self.start)
    }

    pub fn end_date(&self) -> Option<CalendarDate> {
        bound_date(&self.end)
    }

    pub fn week_end(&self) -> Weekday {
        self.week_start.pred()
    }

    pub fn as_range(&self) -> (Bound<CalendarDate>, Bound<CalendarDate>) {
        (self.start, self.end)
    }

    pub fn date_within_range(&self, date: &CalendarDate) -> bool {
        self.as_range().contains(date)
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled.contains(date)
    }

    pub fn is_selectable(&self, date: &CalendarDate) -> bool {
        self.date_within_range(date) && !self.is_disabled(date)
    }

    /// Pulls `date` into the configured range.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        match (self.start_date(), self.end_date()) {
            (Some(start), _) if date < start => start,
            (_, Some(end)) if date > end => end,
            _ => date,
        }
    }

    /// Whether the month before `view` may be shown.
    pub fn can_move_prev(&self, view: &CalendarDate) -> bool {
        self.start_date()
            .map_or(true, |start| view.month_index() > start.month_index())
    }

    /// Whether the month after `view` may be shown.
    pub fn can_move_next(&self, view: &CalendarDate) -> bool {
        self.end_date()
            .map_or(true, |end| view.month_index() < end.month_index())
    }
}

fn bound_date(bound: &Bound<CalendarDate>) -> Option<CalendarDate> {
    match bound {
        Bound::Included(date) | Bound::Excluded(date) => Some(*date),
        Bound::Unbounded => None,
    }
}
