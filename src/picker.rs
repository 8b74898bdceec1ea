use crate::config::Options;
use crate::context::{KeyboardState, ViewState};
use crate::date::CalendarDate;
use crate::events::{Notification, Observers, SubscriptionId};
use crate::grid::{CalendarEngine, Cell, Membership};
use crate::navigation;

/// An inline month picker: selection, displayed month and keyboard focus.
///
/// Every mutation compares the state before and after and tells observers
/// about a changed selection first and a changed month second.
pub struct Datepicker {
    options: Options,
    state: ViewState,
    open: bool,
    today: CalendarDate,
    observers: Observers,
}

impl Datepicker {
    pub fn new(options: Options) -> Self {
        Self::with_today(options, CalendarDate::today())
    }

    pub fn with_today(options: Options, today: CalendarDate) -> Self {
        let view_date = options.constraints.clamp(today);
        log::debug!("New picker showing {}", view_date);

        Datepicker {
            options,
            state: ViewState::new(view_date),
            open: true,
            today,
            observers: Observers::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn date(&self) -> Option<CalendarDate> {
        self.state.date
    }

    pub fn view_date(&self) -> CalendarDate {
        self.state.view_date
    }

    pub fn focus_date(&self) -> Option<CalendarDate> {
        self.state.focus_date
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    pub fn refresh_today(&mut self) {
        self.today = CalendarDate::today();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn keyboard_state(&self) -> KeyboardState {
        self.state.keyboard_state(self.open)
    }

    pub fn engine(&self) -> CalendarEngine<'_> {
        CalendarEngine::new(&self.options.constraints)
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.engine().cells(&self.state, &self.today)
    }

    pub fn title(&self) -> String {
        format!(
            "{} {}",
            self.options.locale.month_name(self.state.view_date.month0()),
            self.state.view_year()
        )
    }

    pub fn weekday_headers(&self) -> Vec<(&'static str, &'static str)> {
        self.options
            .locale
            .weekday_headers(self.options.constraints.week_start)
    }

    pub fn can_move_prev(&self) -> bool {
        self.options.constraints.can_move_prev(&self.state.view_date)
    }

    pub fn can_move_next(&self) -> bool {
        self.options.constraints.can_move_next(&self.state.view_date)
    }

    /// The selection in the configured format, empty without selection.
    pub fn formatted_date(&self) -> String {
        self.state
            .date
            .map(|date| self.options.format_date(&date))
            .unwrap_or_default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn show(&mut self) {
        if !self.open {
            self.open = true;
            self.state.focus_date = None;
            self.observers.notify(&Notification::Shown);
        }
    }

    pub fn hide(&mut self) {
        let before = self.state;
        self.open = false;
        self.state.focus_date = None;
        self.settle(before);
    }

    /// Takes a value typed by the user. Unreadable input clears the selection.
    pub fn update(&mut self, input: Option<&str>) {
        let before = self.state;
        let date = input.and_then(|input| self.options.parse_date(input));

        if date.is_none() && input.map_or(false, |i| !i.trim().is_empty()) {
            log::debug!("Could not read date from '{}'", input.unwrap_or_default());
        }

        self.state.date = date;
        match date {
            Some(date) => self.state.view_date = date,
            None => self.state.view_date = self.options.constraints.clamp(self.state.view_date),
        }

        self.settle(before);
    }

    pub fn set_date(&mut self, date: Option<CalendarDate>) {
        let before = self.state;

        self.state.date = date;
        if let Some(date) = date {
            self.state.view_date = date;
        }

        self.settle(before);
    }

    pub fn set_start_date(&mut self, start: Option<CalendarDate>) {
        self.options.constraints.set_start(start);
        self.reclamp_view();
    }

    pub fn set_end_date(&mut self, end: Option<CalendarDate>) {
        self.options.constraints.set_end(end);
        self.reclamp_view();
    }

    pub fn set_dates_disabled<I: IntoIterator<Item = CalendarDate>>(&mut self, dates: I) {
        self.options.constraints.set_disabled(dates);
    }

    fn reclamp_view(&mut self) {
        if self.state.date.is_none() {
            let before = self.state;
            self.state.view_date = self.options.constraints.clamp(self.state.view_date);
            self.settle(before);
        }
    }

    /// Selects a day of the displayed month.
    ///
    /// Days of neighbouring months and disabled days are ignored, the return
    /// value tells whether the click selected anything.
    pub fn click_day(&mut self, date: CalendarDate) -> bool {
        let cell = self.engine().classify(date, &self.state, &self.today);
        if cell.membership != Membership::Current || cell.disabled {
            return false;
        }

        self.set_date(Some(date));
        true
    }

    pub fn click_prev(&mut self) -> bool {
        self.can_move_prev() && self.navigate_view(-1)
    }

    pub fn click_next(&mut self) -> bool {
        self.can_move_next() && self.navigate_view(1)
    }

    /// Shows the month `months` away from the current one.
    pub fn navigate_view(&mut self, months: i32) -> bool {
        match navigation::move_month(Some(self.state.view_date), months) {
            Some(view_date) => {
                let before = self.state;
                self.state.view_date = view_date;
                self.settle(before);
                true
            }
            None => false,
        }
    }

    pub fn show_month(&mut self, view_date: CalendarDate) {
        let before = self.state;
        self.state.view_date = view_date;
        self.settle(before);
    }

    /// Moves the keyboard focus by `days`, starting at the view date when
    /// nothing is focused yet. Targets outside the range are refused, as is
    /// any move while closed or with keyboard navigation turned off.
    pub fn move_focus(&mut self, days: i64) -> bool {
        if !self.open || !self.options.keyboard_navigation {
            return false;
        }

        let base = self.state.focus_date.unwrap_or(self.state.view_date);
        let target = match base.add_days(days) {
            Some(target) if self.options.constraints.date_within_range(&target) => target,
            _ => return false,
        };

        let before = self.state;
        self.state.focus_date = Some(target);
        self.state.view_date = target;
        self.settle(before);
        true
    }

    /// Drops the focus and shows the selected month again.
    pub fn cancel_focus(&mut self) {
        if self.state.focus_date.is_some() {
            self.blur_focus();
        }
    }

    /// Selects the focused day when keyboard navigation is enabled.
    pub fn commit_focus(&mut self) {
        let before = self.state;
        let target = self
            .state
            .focus_date
            .or(self.state.date)
            .unwrap_or(self.state.view_date);

        if self.options.keyboard_navigation {
            self.state.date = Some(target);
        }
        self.state.focus_date = None;
        self.state.reset_view();

        self.settle(before);
    }

    /// Drops the focus without selecting.
    pub fn blur_focus(&mut self) {
        let before = self.state;
        self.state.focus_date = None;
        self.state.reset_view();
        self.settle(before);
    }

    fn settle(&mut self, before: ViewState) {
        if self.state.date != before.date {
            match self.state.date {
                Some(date) => self.observers.notify(&Notification::DateChanged(date)),
                None => self.observers.notify(&Notification::DateCleared),
            }
        }

        if !self.state.view_date.same_month(&before.view_date) {
            self.observers
                .notify(&Notification::MonthChanged(self.state.view_date));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::PartialOptions;
    use crate::date::ymd;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub(crate) fn recording(picker: &mut Datepicker) -> Rc<RefCell<Vec<Notification>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        picker.subscribe(move |n| sink.borrow_mut().push(*n));
        log
    }

    pub(crate) fn picker_with(explicit: PartialOptions, today: CalendarDate) -> Datepicker {
        let options = Options::builder().explicit(explicit).build().unwrap();
        Datepicker::with_today(options, today)
    }

    fn ranged() -> PartialOptions {
        PartialOptions {
            start_date: Some("03/05/2021".to_owned()),
            end_date: Some("05/20/2021".to_owned()),
            dates_disabled: Some(vec!["04/01/2021".to_owned()]),
            ..PartialOptions::default()
        }
    }

    #[test]
    fn starts_open_without_selection() {
        let picker = picker_with(PartialOptions::default(), ymd(2021, 4, 14));
        assert!(picker.is_open());
        assert_eq!(picker.date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 4, 14));
        assert_eq!(picker.keyboard_state(), KeyboardState::OpenNoFocus);
        assert_eq!(picker.title(), "April 2021");
        assert_eq!(picker.formatted_date(), "");
        assert_eq!(picker.cells().len(), 42);
    }

    #[test]
    fn initial_view_is_clamped_into_range() {
        let picker = picker_with(ranged(), ymd(2022, 1, 1));
        assert_eq!(picker.view_date(), ymd(2021, 5, 20));
    }

    #[test]
    fn typed_dates_select_and_clear() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 14));
        let log = recording(&mut picker);

        picker.update(Some("04/15/2021"));
        assert_eq!(picker.date(), Some(ymd(2021, 4, 15)));
        assert_eq!(picker.formatted_date(), "04/15/2021");

        picker.update(Some("04/15/2021"));
        picker.update(Some("not a date"));
        assert_eq!(picker.date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 4, 15));

        assert_eq!(
            *log.borrow(),
            vec![
                Notification::DateChanged(ymd(2021, 4, 15)),
                Notification::MonthChanged(ymd(2021, 4, 15)),
                Notification::DateCleared,
            ]
        );
    }

    #[test]
    fn clicks_only_select_current_month() {
        let mut picker = picker_with(ranged(), ymd(2021, 4, 14));

        assert!(!picker.click_day(ymd(2021, 3, 31)));
        assert!(!picker.click_day(ymd(2021, 5, 1)));
        assert!(!picker.click_day(ymd(2021, 4, 1)));
        assert_eq!(picker.date(), None);

        assert!(picker.click_day(ymd(2021, 4, 2)));
        assert_eq!(picker.date(), Some(ymd(2021, 4, 2)));
        assert!(picker.cells().iter().any(|c| c.active && c.date == ymd(2021, 4, 2)));
    }

    #[test]
    fn month_arrows_respect_range() {
        let mut picker = picker_with(ranged(), ymd(2021, 4, 14));
        let log = recording(&mut picker);

        assert!(picker.click_prev());
        assert_eq!(picker.view_date(), ymd(2021, 3, 14));
        assert!(!picker.can_move_prev());
        assert!(!picker.click_prev());

        assert!(picker.click_next());
        assert!(picker.click_next());
        assert_eq!(picker.view_date(), ymd(2021, 5, 14));
        assert!(!picker.click_next());

        assert_eq!(log.borrow().len(), 3);
        assert_eq!(
            log.borrow().last(),
            Some(&Notification::MonthChanged(ymd(2021, 5, 14)))
        );
    }

    #[test]
    fn view_navigation_clamps_day() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 1, 31));
        assert!(picker.click_next());
        assert_eq!(picker.view_date(), ymd(2021, 2, 28));
        assert!(picker.navigate_view(-13));
        assert_eq!(picker.view_date(), ymd(2020, 1, 28));
    }

    #[test]
    fn focus_moves_stay_in_range() {
        let mut picker = picker_with(ranged(), ymd(2021, 3, 6));

        assert!(picker.move_focus(-1));
        assert_eq!(picker.focus_date(), Some(ymd(2021, 3, 5)));
        assert_eq!(picker.keyboard_state(), KeyboardState::OpenFocused);

        assert!(!picker.move_focus(-1));
        assert!(!picker.move_focus(-7));
        assert_eq!(picker.focus_date(), Some(ymd(2021, 3, 5)));

        // disabled days may be focused, only the range is checked
        picker.show_month(ymd(2021, 3, 25));
        picker.blur_focus();
        assert!(picker.move_focus(7));
        assert_eq!(picker.focus_date(), Some(ymd(2021, 4, 1)));
    }

    #[test]
    fn commit_selects_focus_and_notifies_in_order() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 29));
        let log = recording(&mut picker);

        assert!(picker.move_focus(7));
        picker.commit_focus();

        assert_eq!(picker.date(), Some(ymd(2021, 4, 5)));
        assert_eq!(picker.focus_date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 4, 5));
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::MonthChanged(ymd(2021, 4, 5)),
                Notification::DateChanged(ymd(2021, 4, 5)),
            ]
        );
    }

    #[test]
    fn selection_notification_precedes_month_change() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 29));
        let log = recording(&mut picker);

        picker.set_date(Some(ymd(2021, 6, 1)));
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::DateChanged(ymd(2021, 6, 1)),
                Notification::MonthChanged(ymd(2021, 6, 1)),
            ]
        );
    }

    #[test]
    fn commit_without_keyboard_navigation_only_drops_focus() {
        let explicit = PartialOptions {
            keyboard_navigation: Some(false),
            ..PartialOptions::default()
        };
        let mut picker = picker_with(explicit, ymd(2021, 3, 29));
        picker.set_date(Some(ymd(2021, 3, 1)));
        picker.show_month(ymd(2021, 5, 1));

        picker.commit_focus();
        assert_eq!(picker.date(), Some(ymd(2021, 3, 1)));
        assert_eq!(picker.focus_date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 3, 1));
    }

    #[test]
    fn focus_needs_keyboard_navigation() {
        let explicit = PartialOptions {
            keyboard_navigation: Some(false),
            ..PartialOptions::default()
        };
        let mut picker = picker_with(explicit, ymd(2021, 3, 10));

        assert!(!picker.move_focus(1));
        assert_eq!(picker.focus_date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 3, 10));
        assert_eq!(picker.keyboard_state(), KeyboardState::OpenNoFocus);
    }

    #[test]
    fn closed_picker_ignores_focus_and_reopens_unfocused() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 10));
        picker.hide();

        assert!(!picker.move_focus(1));
        assert_eq!(picker.focus_date(), None);

        picker.show();
        assert_eq!(picker.keyboard_state(), KeyboardState::OpenNoFocus);
    }

    #[test]
    fn cancel_reverts_view_to_selection() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 29));
        picker.set_date(Some(ymd(2021, 3, 10)));
        assert!(picker.move_focus(14));
        assert_eq!(picker.view_date(), ymd(2021, 3, 24));
        assert!(picker.move_focus(14));
        assert_eq!(picker.view_date().month(), 4);

        picker.cancel_focus();
        assert_eq!(picker.focus_date(), None);
        assert_eq!(picker.view_date(), ymd(2021, 3, 10));
        assert_eq!(picker.date(), Some(ymd(2021, 3, 10)));
    }

    #[test]
    fn hide_and_show() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 29));
        let log = recording(&mut picker);

        picker.show();
        assert!(log.borrow().is_empty());

        assert!(picker.move_focus(1));
        picker.hide();
        assert_eq!(picker.keyboard_state(), KeyboardState::Closed);
        assert_eq!(picker.focus_date(), None);

        picker.show();
        assert_eq!(log.borrow().last(), Some(&Notification::Shown));
    }

    #[test]
    fn changing_range_pulls_view_along() {
        let mut picker = picker_with(PartialOptions::default(), ymd(2021, 3, 29));
        picker.set_start_date(Some(ymd(2021, 8, 1)));
        assert_eq!(picker.view_date(), ymd(2021, 8, 1));

        picker.set_end_date(Some(ymd(2021, 8, 31)));
        picker.set_dates_disabled(vec![ymd(2021, 8, 2)]);
        assert!(!picker.click_day(ymd(2021, 8, 2)));
        assert!(picker.click_day(ymd(2021, 8, 3)));

        // a selection keeps the view where it is
        picker.set_start_date(Some(ymd(2021, 9, 1)));
        assert_eq!(picker.view_date(), ymd(2021, 8, 3));
    }

    #[test]
    fn headers_follow_week_start() {
        let explicit = PartialOptions {
            week_start: Some(0),
            language: Some("de".to_owned()),
            ..PartialOptions::default()
        };
        let picker = picker_with(explicit, ymd(2021, 3, 29));
        assert_eq!(picker.weekday_headers()[0], ("Sonntag", "Son"));
        assert_eq!(picker.title(), "März 2021");
    }
}
