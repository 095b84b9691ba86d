pub mod controller;
pub mod generator;
pub mod loop_worker;

pub use controller::StreamController;
pub use generator::next_reading;
