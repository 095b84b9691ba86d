pub mod history_entry;
pub mod reading;

pub use history_entry::HistoryEntry;
pub use reading::Reading;
