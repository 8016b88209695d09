#[macro_use]
extern crate log;

mod history;
pub use history::{EntryHistory, PREDICTION_WINDOW_MONTHS};

pub mod calendar;

pub use mindcycle_algos::{CyclePredictor, PredictionError};
