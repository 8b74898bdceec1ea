use crate::cmds::{Cmd, CmdResult};
use crate::context::KeyboardState;
use crate::ctrl::{Control, Selection};
use crate::picker::Datepicker;

/// Drives the keyboard state machine of a [`Datepicker`].
///
/// A closed picker only reacts to `Cancel`, which opens it again. Arrow
/// commands need keyboard navigation to be enabled and are passed back
/// unhandled otherwise.
#[derive(Default)]
pub struct PickerController {}

impl Control for PickerController {
    fn send_cmd(&mut self, cmd: &Cmd, picker: &mut Datepicker) -> CmdResult {
        if picker.keyboard_state() == KeyboardState::Closed {
            return match cmd {
                Cmd::Cancel => {
                    picker.show();
                    Ok(Cmd::Noop)
                }
                _ => Ok(*cmd),
            };
        }

        let arrows = picker.options().keyboard_navigation;

        match cmd {
            Cmd::PrevDay if arrows => {
                self.move_left(picker);
                Ok(Cmd::Noop)
            }
            Cmd::NextDay if arrows => {
                self.move_right(picker);
                Ok(Cmd::Noop)
            }
            Cmd::PrevWeek if arrows => {
                self.move_up(picker);
                Ok(Cmd::Noop)
            }
            Cmd::NextWeek if arrows => {
                self.move_down(picker);
                Ok(Cmd::Noop)
            }
            Cmd::Cancel => {
                picker.cancel_focus();
                Ok(Cmd::Noop)
            }
            Cmd::Commit => {
                picker.commit_focus();
                Ok(Cmd::Noop)
            }
            Cmd::Blur => {
                picker.blur_focus();
                Ok(Cmd::Noop)
            }
            Cmd::Space => Ok(Cmd::Noop),
            _ => Ok(*cmd),
        }
    }
}

impl Selection for PickerController {
    fn move_n_left(&mut self, n: u32, picker: &mut Datepicker) -> bool {
        picker.move_focus(-i64::from(n))
    }

    fn move_n_right(&mut self, n: u32, picker: &mut Datepicker) -> bool {
        picker.move_focus(i64::from(n))
    }

    fn move_n_up(&mut self, n: u32, picker: &mut Datepicker) -> bool {
        picker.move_focus(-7 * i64::from(n))
    }

    fn move_n_down(&mut self, n: u32, picker: &mut Datepicker) -> bool {
        picker.move_focus(7 * i64::from(n))
    }
}
