use crate::date::CalendarDate;

/// What the picker currently shows and which days are marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Selected day
    pub date: Option<CalendarDate>,
    /// Any day of the displayed month
    pub view_date: CalendarDate,
    /// Day the keyboard cursor sits on
    pub focus_date: Option<CalendarDate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardState {
    Closed,
    OpenNoFocus,
    OpenFocused,
}

impl ViewState {
    pub fn new(view_date: CalendarDate) -> Self {
        ViewState {
            date: None,
            view_date,
            focus_date: None,
        }
    }

    pub fn with_date(mut self, date: Option<CalendarDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_focus(mut self, focus_date: Option<CalendarDate>) -> Self {
        self.focus_date = focus_date;
        self
    }

    pub fn view_year(&self) -> i32 {
        self.view_date.year()
    }

    /// Displayed month starting at 1
    pub fn view_month(&self) -> u32 {
        self.view_date.month()
    }

    /// Shows the selected day again, if there is one.
    pub fn reset_view(&mut self) {
        self.view_date = self.date.unwrap_or(self.view_date);
    }

    pub fn keyboard_state(&self, open: bool) -> KeyboardState {
        match (open, self.focus_date) {
            (false, _) => KeyboardState::Closed,
            (true, None) => KeyboardState::OpenNoFocus,
            (true, Some(_)) => KeyboardState::OpenFocused,
        }
    }
}
