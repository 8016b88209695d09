use std::{fs, path::Path};

use anyhow::Context;
use chrono::{Months, NaiveDate, NaiveDateTime};
use mindcycle_algos::{CyclePredictor, PredictionError};
use mindcycle_types::{CyclePrediction, LogEntry};

/// Months of history the prediction looks back over.
pub const PREDICTION_WINDOW_MONTHS: u32 = 6;

/// Read-only view over the logged entries, newest first.
#[derive(Debug, Clone, Default)]
pub struct EntryHistory {
    entries: Vec<LogEntry>,
}

impl EntryHistory {
    pub fn new(mut entries: Vec<LogEntry>) -> Self {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let entries: Vec<LogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Unable to read entries from {}", path.display()))?;

        let history = Self::from_json_str(&json)
            .with_context(|| format!("Invalid entries file {}", path.display()))?;

        debug!("Loaded {} entries from {}", history.len(), path.display());
        Ok(history)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with `start <= timestamp <= end`, newest first.
    pub fn entries_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> &[LogEntry] {
        if start > end {
            return &[];
        }

        let from = self.entries.partition_point(|e| e.timestamp > end);
        let to = self.entries.partition_point(|e| e.timestamp >= start);
        &self.entries[from..to]
    }

    /// Entries from the last `months` calendar months up to and including `now`.
    pub fn recent(&self, now: NaiveDateTime, months: u32) -> &[LogEntry] {
        let start = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDateTime::MIN);

        self.entries_between(start, now)
    }

    pub fn period_starts(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.is_period_start)
    }

    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.timestamp.date() == date)
    }

    /// Runs the cycle prediction over the trailing `months` window ending at `now`.
    pub fn predict(
        &self,
        now: NaiveDateTime,
        months: u32,
    ) -> Result<Option<CyclePrediction>, PredictionError> {
        let window = self.recent(now, months);
        debug!(
            "Predicting from {} of {} entries (last {} months)",
            window.len(),
            self.len(),
            months
        );

        let prediction = CyclePredictor::predict(window, now)?;
        match &prediction {
            Some(p) => debug!(
                "Average cycle {} days, next period {}",
                p.average_cycle_length, p.next_period_start
            ),
            None => debug!("Not enough plausible cycles for a prediction"),
        }

        Ok(prediction)
    }
}
