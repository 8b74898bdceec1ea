pub mod cmds;
pub mod config;
pub mod constraints;
pub mod context;
pub mod ctrl;
pub mod date;
pub mod error;
pub mod events;
pub mod format;
pub mod grid;
pub mod locale;
pub mod navigation;
pub mod picker;

pub use config::{Options, PartialOptions};
pub use constraints::Constraints;
pub use context::{KeyboardState, ViewState};
pub use date::CalendarDate;
pub use events::{Notification, SubscriptionId};
pub use grid::{CalendarEngine, Cell, Membership};
pub use navigation::move_month;
pub use picker::Datepicker;
