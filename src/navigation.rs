use crate::date::{days_of_month, CalendarDate};

/// Moves `date` by `dir` months.
///
/// A single step keeps the day of month unless the target month is shorter,
/// in which case the day is lowered to the last day of the target month
/// (Jan 31 + 1 month is Feb 28 or 29, never a day in March).
///
/// Larger jumps walk one month at a time and afterwards restore the original
/// day of month, clamping only once in the final month. Jan 31 + 2 months
/// therefore lands on Mar 31 although the walk passes Feb 28.
///
/// Returns `None` for a missing date or when the result leaves the
/// representable range.
pub fn move_month(date: Option<CalendarDate>, dir: i32) -> Option<CalendarDate> {
    let date = date?;

    if dir == 0 {
        return Some(date);
    }

    let step = dir.signum();
    if dir.unsigned_abs() == 1 {
        return step_month(date, step);
    }

    let mut moved = date;
    for _ in 0..dir.unsigned_abs() {
        // each step may lower the day; that is undone below
        moved = step_month(moved, step)?;
    }

    clamp_day(moved.year(), moved.month(), date.day())
}

fn step_month(date: CalendarDate, step: i32) -> Option<CalendarDate> {
    let target = date.month_index() + step as i64;
    let year = target.div_euclid(12) as i32;
    let month = target.rem_euclid(12) as u32 + 1;

    clamp_day(year, month, date.day())
}

fn clamp_day(year: i32, month: u32, day: u32) -> Option<CalendarDate> {
    CalendarDate::new(year, month, day.min(days_of_month(year, month)))
}
