pub(crate) mod entry;
pub use entry::{EntryError, LogEntry};

pub(crate) mod mood;
pub use mood::MoodLevel;

pub(crate) mod phase;
pub use phase::CyclePhase;

pub(crate) mod prediction;
pub use prediction::CyclePrediction;
