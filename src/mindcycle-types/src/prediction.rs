use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclePrediction {
    pub next_period_start: NaiveDateTime,
    pub next_period_end: NaiveDateTime,
    pub next_ovulation: NaiveDateTime,
    pub average_cycle_length: u32,
    /// 0.0 - 1.0, higher for more regular cycles.
    pub confidence: f64,
}

impl CyclePrediction {
    /// Inclusive on both ends, compared by calendar date.
    pub fn is_predicted_period(&self, date: NaiveDate) -> bool {
        date >= self.next_period_start.date() && date <= self.next_period_end.date()
    }

    pub fn is_predicted_ovulation(&self, date: NaiveDate) -> bool {
        date == self.next_ovulation.date()
    }
}

impl Display for CyclePrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Next period: {} - {}\nOvulation: {}\n",
            self.next_period_start.date(),
            self.next_period_end.date(),
            self.next_ovulation.date(),
        ))?;
        f.write_fmt(format_args!(
            "Average cycle length: {} days\nConfidence: {:.0}%",
            self.average_cycle_length,
            self.confidence * 100.0,
        ))?;
        Ok(())
    }
}
