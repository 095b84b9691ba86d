pub mod commands;
pub mod controller;
pub mod manual;
pub mod state;

pub use controller::{DashboardController, SelectorOptions};
pub use manual::{ManualField, ManualForm, ManualInput};
pub use state::{DashboardSnapshot, DashboardState, DataSource, SessionState};
