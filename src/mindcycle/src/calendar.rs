use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::{Datelike, Months, NaiveDate};
use mindcycle_types::{CyclePrediction, LogEntry};

use crate::EntryHistory;

/// A calendar month, parsed from `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.0.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }
}

impl FromStr for CalendarMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| anyhow!("Invalid month `{}`, expected YYYY-MM", s))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub entry: Option<&'a LogEntry>,
    pub predicted_period: bool,
    pub predicted_ovulation: bool,
}

impl CalendarDay<'_> {
    pub fn is_period(&self) -> bool {
        self.entry.is_some_and(|e| e.is_period)
    }

    pub fn is_period_start(&self) -> bool {
        self.entry.is_some_and(|e| e.is_period_start)
    }
}

pub fn month_view<'a>(
    month: CalendarMonth,
    history: &'a EntryHistory,
    prediction: Option<&CyclePrediction>,
) -> Vec<CalendarDay<'a>> {
    month
        .days()
        .map(|date| CalendarDay {
            date,
            entry: history.entry_for_date(date),
            predicted_period: prediction.is_some_and(|p| p.is_predicted_period(date)),
            predicted_ovulation: prediction.is_some_and(|p| p.is_predicted_ovulation(date)),
        })
        .collect()
}

impl Display for CalendarDay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} {}", self.date, self.date.format("%a")))?;

        if let Some(entry) = self.entry {
            f.write_fmt(format_args!(
                "  {:<10} {:<13}",
                entry.mood.to_string(),
                entry.cycle_phase.to_string()
            ))?;
        }

        if self.is_period_start() {
            f.write_str("  period start")?;
        } else if self.is_period() {
            f.write_str("  period")?;
        }
        if self.predicted_period {
            f.write_str("  predicted period")?;
        }
        if self.predicted_ovulation {
            f.write_str("  predicted ovulation")?;
        }
        Ok(())
    }
}
