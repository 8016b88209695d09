use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CyclePhase, MoodLevel};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry timestamp {timestamp} is later than {now}")]
    FutureTimestamp {
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    },
}

/// A single day in the mood/cycle log.
///
/// Only `timestamp` and `is_period_start` feed the cycle prediction, the rest
/// is carried for the journal and calendar views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub mood: MoodLevel,
    #[serde(default)]
    pub cycle_phase: CyclePhase,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub is_period_start: bool,
    #[serde(default)]
    pub is_period: bool,
}

impl LogEntry {
    pub fn new(
        timestamp: NaiveDateTime,
        mood: MoodLevel,
        cycle_phase: CyclePhase,
        now: NaiveDateTime,
    ) -> Result<Self, EntryError> {
        if timestamp > now {
            return Err(EntryError::FutureTimestamp { timestamp, now });
        }

        Ok(Self {
            timestamp,
            mood,
            cycle_phase,
            note: None,
            symptoms: Vec::new(),
            is_period_start: false,
            is_period: false,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the entry as the first day of a period. A period start is
    /// always a period day as well.
    pub fn period_start(mut self) -> Self {
        self.is_period_start = true;
        self.is_period = true;
        self
    }

    pub fn period(mut self) -> Self {
        self.is_period = true;
        self
    }
}
