use crate::picker::Datepicker;

/// Cursor movement on a day grid. Each call reports whether the cursor moved.
pub trait Selection {
    fn move_left(&mut self, picker: &mut Datepicker) -> bool {
        self.move_n_left(1, picker)
    }

    fn move_right(&mut self, picker: &mut Datepicker) -> bool {
        self.move_n_right(1, picker)
    }

    fn move_up(&mut self, picker: &mut Datepicker) -> bool {
        self.move_n_up(1, picker)
    }

    fn move_down(&mut self, picker: &mut Datepicker) -> bool {
        self.move_n_down(1, picker)
    }

    fn move_n_left(&mut self, n: u32, picker: &mut Datepicker) -> bool;
    fn move_n_right(&mut self, n: u32, picker: &mut Datepicker) -> bool;
    fn move_n_up(&mut self, n: u32, picker: &mut Datepicker) -> bool;
    fn move_n_down(&mut self, n: u32, picker: &mut Datepicker) -> bool;
}
