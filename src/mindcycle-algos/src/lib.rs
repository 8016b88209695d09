pub(crate) mod cycle;
pub use cycle::{CyclePredictor, PredictionError};

pub mod helpers;
