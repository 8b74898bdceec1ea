pub mod control;
pub mod pickerctrl;
pub mod select;

pub use control::{Control, Controller};
pub use pickerctrl::PickerController;
pub use select::Selection;
