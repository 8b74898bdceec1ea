use chrono::Weekday;

use crate::constraints::Constraints;
use crate::context::ViewState;
use crate::date::CalendarDate;
use crate::navigation;

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// Month a cell belongs to, relative to the displayed month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Old,
    Current,
    New,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub date: CalendarDate,
    pub membership: Membership,
    pub today: bool,
    pub active: bool,
    pub focused: bool,
    /// Out of range or explicitly disabled
    pub disabled: bool,
    /// Explicitly disabled
    pub disabled_date: bool,
    /// Earlier day of the current real-world month
    pub past: bool,
}

impl Cell {
    pub fn day_num(&self) -> u32 {
        self.date.day()
    }

    pub fn is_old(&self) -> bool {
        self.membership == Membership::Old
    }

    pub fn is_new(&self) -> bool {
        self.membership == Membership::New
    }

    pub fn is_current(&self) -> bool {
        self.membership == Membership::Current
    }

    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::with_capacity(4);

        match self.membership {
            Membership::Old => classes.push("old"),
            Membership::New => classes.push("new"),
            Membership::Current => {}
        }
        if self.focused {
            classes.push("focused");
        }
        if self.today {
            classes.push("today");
        }
        if self.past {
            classes.push("past");
        }
        if self.active {
            classes.push("active");
        }
        if self.disabled {
            classes.push("disabled");
        }
        if self.disabled_date {
            classes.push("disabled-date");
        }
        classes.push("day");

        classes
    }
}

/// Stateless calendar logic over a set of constraints.
pub struct CalendarEngine<'c> {
    constraints: &'c Constraints,
}

impl<'c> CalendarEngine<'c> {
    pub fn new(constraints: &'c Constraints) -> Self {
        CalendarEngine { constraints }
    }

    pub fn constraints(&self) -> &Constraints {
        self.constraints
    }

    pub fn is_selectable(&self, date: &CalendarDate) -> bool {
        self.constraints.is_selectable(date)
    }

    pub fn navigate(&self, date: Option<CalendarDate>, months: i32) -> Option<CalendarDate> {
        navigation::move_month(date, months)
    }

    /// Weekday of each grid column
    pub fn weekdays(&self) -> Vec<Weekday> {
        std::iter::successors(Some(self.constraints.week_start), |day| Some(day.succ()))
            .take(GRID_COLUMNS)
            .collect()
    }

    /// First day shown for the month of `view`.
    ///
    /// Backs up from the last day of the previous month to the closest week
    /// start, so a month beginning on the week start still gets a full row of
    /// the previous month.
    pub fn first_cell(&self, view: &CalendarDate) -> Option<CalendarDate> {
        let prev_last = view.first_of_month().add_days(-1)?;
        let back = (prev_last.weekday().num_days_from_sunday() + 7
            - self.constraints.week_start.num_days_from_sunday())
            % 7;

        prev_last.add_days(-(back as i64))
    }

    /// The 6x7 day grid for `state`, row by row.
    pub fn cells(&self, state: &ViewState, today: &CalendarDate) -> Vec<Cell> {
        let first = match self.first_cell(&state.view_date) {
            Some(first) if first.add_days(GRID_CELLS as i64 - 1).is_some() => first,
            _ => {
                log::warn!("No grid for month of {}", state.view_date);
                return Vec::new();
            }
        };

        (0..GRID_CELLS as i64)
            .filter_map(|offset| first.add_days(offset))
            .map(|date| self.classify(date, state, today))
            .collect()
    }

    pub fn classify(&self, date: CalendarDate, state: &ViewState, today: &CalendarDate) -> Cell {
        let view = state.view_date.month_index();
        let membership = match date.month_index() {
            idx if idx < view => Membership::Old,
            idx if idx > view => Membership::New,
            _ => Membership::Current,
        };
        let disabled_date = self.constraints.is_disabled(&date);

        Cell {
            date,
            membership,
            today: date == *today,
            active: state.date == Some(date),
            focused: state.focus_date == Some(date),
            disabled: disabled_date || !self.constraints.date_within_range(&date),
            disabled_date,
            past: date.same_month(today) && date < *today,
        }
    }
}
