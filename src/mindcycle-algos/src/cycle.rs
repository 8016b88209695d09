use chrono::{NaiveDateTime, TimeDelta};
use mindcycle_types::{CyclePrediction, LogEntry};
use thiserror::Error;

use crate::helpers::stats::{mean, round_half_up, std_dev};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("entry at {timestamp} is later than the reference time {now}")]
    FutureEntry {
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    },
    #[error("projected date out of range")]
    DateOutOfRange,
}

pub struct CyclePredictor;

/// Next-cycle projection from logged period starts:
/// 1. Sort period-start entries chronologically
/// 2. Take the whole-day gap between each consecutive pair
/// 3. Drop gaps outside [MIN_CYCLE_DAYS, MAX_CYCLE_DAYS] (missed logging,
///    duplicates, multi-month breaks)
/// 4. Average the remaining gaps, rounding half up to whole days
/// 5. Project from the most recent period start
///
/// The window and the period/luteal constants are product heuristics, not
/// physiological limits.
impl CyclePredictor {
    /// Shortest gap between period starts that counts as a cycle
    pub const MIN_CYCLE_DAYS: i64 = 20;

    /// Longest gap between period starts that counts as a cycle
    pub const MAX_CYCLE_DAYS: i64 = 40;

    /// Predicted period duration, counted from the start day
    pub const PERIOD_DAYS: i64 = 5;

    /// Ovulation is placed this many days before the next period start
    pub const LUTEAL_DAYS: i64 = 14;

    /// Confidence reported when there are too few cycles to measure spread
    pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

    /// Returns `Ok(None)` when the history holds no plausible cycle. Entries
    /// dated after `now` are rejected instead of skipped.
    pub fn predict(
        entries: &[LogEntry],
        now: NaiveDateTime,
    ) -> Result<Option<CyclePrediction>, PredictionError> {
        if let Some(entry) = entries.iter().find(|e| e.timestamp > now) {
            return Err(PredictionError::FutureEntry {
                timestamp: entry.timestamp,
                now,
            });
        }

        let starts = Self::period_starts(entries);
        let Some(&anchor) = starts.last() else {
            return Ok(None);
        };

        let lengths = Self::plausible_gaps(&starts);
        if lengths.is_empty() {
            return Ok(None);
        }

        let lengths = lengths.into_iter().map(|l| l as f64).collect::<Vec<_>>();
        let average = mean(&lengths);
        let average_cycle_length = round_half_up(average);

        let next_period_start = shift(anchor, average_cycle_length)?;
        let next_period_end = shift(next_period_start, Self::PERIOD_DAYS)?;
        let next_ovulation = shift(next_period_start, -Self::LUTEAL_DAYS)?;

        Ok(Some(CyclePrediction {
            next_period_start,
            next_period_end,
            next_ovulation,
            average_cycle_length: average_cycle_length as u32,
            confidence: Self::confidence(&lengths, average),
        }))
    }

    /// Plausible cycle lengths in days, oldest cycle first.
    pub fn cycle_lengths(entries: &[LogEntry]) -> Vec<i64> {
        Self::plausible_gaps(&Self::period_starts(entries))
    }

    /// `1 - clamp(std / mean, 0, 1)`, neutral below two cycles.
    pub fn confidence(lengths: &[f64], mean: f64) -> f64 {
        if lengths.len() < 2 || mean <= 0.0 {
            return Self::NEUTRAL_CONFIDENCE;
        }

        let std = std_dev(lengths, mean);
        1.0 - (std / mean).clamp(0.0, 1.0)
    }

    fn period_starts(entries: &[LogEntry]) -> Vec<NaiveDateTime> {
        let mut starts = entries
            .iter()
            .filter(|e| e.is_period_start)
            .map(|e| e.timestamp)
            .collect::<Vec<_>>();

        starts.sort();
        starts
    }

    fn plausible_gaps(starts: &[NaiveDateTime]) -> Vec<i64> {
        starts
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .filter(|days| (Self::MIN_CYCLE_DAYS..=Self::MAX_CYCLE_DAYS).contains(days))
            .collect()
    }
}

fn shift(time: NaiveDateTime, days: i64) -> Result<NaiveDateTime, PredictionError> {
    TimeDelta::try_days(days)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or(PredictionError::DateOutOfRange)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mindcycle_types::{CyclePhase, MoodLevel};
    use rand::seq::SliceRandom;

    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        day(2024, 6, 30)
    }

    fn entry(time: NaiveDateTime, period_start: bool) -> LogEntry {
        let entry = LogEntry::new(time, MoodLevel::Neutral, CyclePhase::None, now()).unwrap();
        if period_start {
            entry.period_start()
        } else {
            entry
        }
    }

    /// Period starts at the given day offsets from 2024-01-01.
    fn starts_at(offsets: &[i64]) -> Vec<LogEntry> {
        offsets
            .iter()
            .map(|&d| entry(day(2024, 1, 1) + TimeDelta::days(d), true))
            .collect()
    }

    #[test]
    fn empty_history_has_no_prediction() {
        assert_eq!(CyclePredictor::predict(&[], now()), Ok(None));
    }

    #[test]
    fn single_period_start_has_no_prediction() {
        let mut entries = starts_at(&[0]);
        // plenty of ordinary entries do not help
        entries.extend((1..60).map(|d| entry(day(2024, 1, 1) + TimeDelta::days(d), false)));
        assert_eq!(CyclePredictor::predict(&entries, now()), Ok(None));
    }

    #[test]
    fn only_ordinary_entries_have_no_prediction() {
        let entries = (0..90)
            .map(|d| entry(day(2024, 1, 1) + TimeDelta::days(d), false))
            .collect::<Vec<_>>();
        assert_eq!(CyclePredictor::predict(&entries, now()), Ok(None));
    }

    #[test]
    fn implausible_gaps_are_excluded() {
        // gaps: 5 (too short), 28, 45 (too long)
        let entries = starts_at(&[0, 5, 33, 78]);
        assert_eq!(CyclePredictor::cycle_lengths(&entries), vec![28]);

        let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
        assert_eq!(prediction.average_cycle_length, 28);
    }

    #[test]
    fn all_gaps_implausible_has_no_prediction() {
        // gaps: 2, 148
        let entries = starts_at(&[0, 2, 150]);
        assert!(CyclePredictor::cycle_lengths(&entries).is_empty());
        assert_eq!(CyclePredictor::predict(&entries, now()), Ok(None));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert_eq!(CyclePredictor::cycle_lengths(&starts_at(&[0, 20])), vec![20]);
        assert_eq!(CyclePredictor::cycle_lengths(&starts_at(&[0, 40])), vec![40]);
        assert!(CyclePredictor::cycle_lengths(&starts_at(&[0, 19])).is_empty());
        assert!(CyclePredictor::cycle_lengths(&starts_at(&[0, 41])).is_empty());
    }

    #[test]
    fn duplicate_timestamps_are_excluded() {
        let entries = starts_at(&[0, 0, 28, 28]);
        assert_eq!(CyclePredictor::cycle_lengths(&entries), vec![28]);
    }

    #[test]
    fn partial_days_are_truncated() {
        let earlier = day(2024, 1, 1);
        // 27 days and 23 hours is 27 whole days
        let later = earlier + TimeDelta::days(28) - TimeDelta::hours(1);
        let entries = vec![entry(earlier, true), entry(later, true)];
        assert_eq!(CyclePredictor::cycle_lengths(&entries), vec![27]);
    }

    #[test]
    fn single_cycle_projection() {
        // day 1 and day 29
        let entries = starts_at(&[0, 28]);
        let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
        let anchor = day(2024, 1, 29);

        assert_eq!(prediction.average_cycle_length, 28);
        assert_eq!(prediction.next_period_start, anchor + TimeDelta::days(28));
        assert_eq!(
            prediction.next_ovulation,
            prediction.next_period_start - TimeDelta::days(14)
        );
        assert_eq!(
            prediction.next_period_end,
            prediction.next_period_start + TimeDelta::days(5)
        );
        assert_eq!(prediction.confidence, CyclePredictor::NEUTRAL_CONFIDENCE);
    }

    #[test]
    fn half_day_average_rounds_up() {
        // gaps 28 and 29 -> 28.5 -> 29
        let entries = starts_at(&[0, 28, 57]);
        let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
        assert_eq!(prediction.average_cycle_length, 29);
    }

    #[test]
    fn calendar_scenario() {
        let entries = vec![
            entry(day(2024, 1, 1), true),
            entry(day(2024, 1, 29), true),
            entry(day(2024, 2, 27), true),
        ];
        let prediction = CyclePredictor::predict(&entries, day(2024, 3, 1))
            .unwrap()
            .unwrap();

        assert_eq!(CyclePredictor::cycle_lengths(&entries), vec![28, 29]);
        assert_eq!(prediction.average_cycle_length, 29);
        assert_eq!(prediction.next_period_start, day(2024, 3, 27));
        assert_eq!(prediction.next_ovulation, day(2024, 3, 13));
        assert_eq!(prediction.next_period_end, day(2024, 4, 1));
    }

    #[test]
    fn anchors_on_latest_start_regardless_of_order() {
        let entries = vec![
            entry(day(2024, 2, 27), true),
            entry(day(2024, 1, 1), true),
            entry(day(2024, 3, 3), false),
            entry(day(2024, 1, 29), true),
        ];
        let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
        assert_eq!(prediction.next_period_start, day(2024, 2, 27) + TimeDelta::days(29));
    }

    #[test]
    fn shuffled_input_gives_identical_output() {
        let mut entries = starts_at(&[0, 27, 56, 86, 113, 141]);
        entries.extend(
            (0..150)
                .step_by(3)
                .map(|d| entry(day(2024, 1, 1) + TimeDelta::days(d), false)),
        );
        let expected = CyclePredictor::predict(&entries, now()).unwrap().unwrap();

        let mut rng = rand::rng();
        for _ in 0..20 {
            entries.shuffle(&mut rng);
            let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
            assert_eq!(prediction, expected);
            assert_eq!(prediction.confidence.to_bits(), expected.confidence.to_bits());
        }
    }

    #[test]
    fn future_entry_is_rejected() {
        let mut entries = starts_at(&[0, 28]);
        let mut late = entry(day(2024, 2, 1), true);
        late.timestamp = day(2024, 7, 2);
        entries.push(late);

        assert_eq!(
            CyclePredictor::predict(&entries, now()),
            Err(PredictionError::FutureEntry {
                timestamp: day(2024, 7, 2),
                now: now(),
            })
        );
    }

    #[test]
    fn future_ordinary_entry_is_rejected_too() {
        let mut entries = starts_at(&[0, 28]);
        let mut late = entry(day(2024, 2, 1), false);
        late.timestamp = now() + TimeDelta::seconds(1);
        entries.push(late);

        assert!(matches!(
            CyclePredictor::predict(&entries, now()),
            Err(PredictionError::FutureEntry { .. })
        ));
    }

    #[test]
    fn confidence_regular_cycles() {
        // identical cycles -> no spread -> full confidence
        let entries = starts_at(&[0, 28, 56, 84]);
        let prediction = CyclePredictor::predict(&entries, now()).unwrap().unwrap();
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn confidence_drops_with_spread() {
        let regular = starts_at(&[0, 28, 57, 85]);
        let irregular = starts_at(&[0, 21, 60, 82]);
        let regular = CyclePredictor::predict(&regular, now()).unwrap().unwrap();
        let irregular = CyclePredictor::predict(&irregular, now()).unwrap().unwrap();

        assert!(
            regular.confidence > irregular.confidence,
            "regular cycles should be more predictable: {} vs {}",
            regular.confidence,
            irregular.confidence
        );
        assert!(irregular.confidence > 0.0 && irregular.confidence < 1.0);
    }

    #[test]
    fn confidence_formula() {
        // mean 29, population std 1
        let confidence = CyclePredictor::confidence(&[28.0, 30.0], 29.0);
        assert!((confidence - (1.0 - 1.0 / 29.0)).abs() < f64::EPSILON);
        assert_eq!(
            CyclePredictor::confidence(&[28.0], 28.0),
            CyclePredictor::NEUTRAL_CONFIDENCE
        );
    }

    #[test]
    fn entries_are_not_modified() {
        let entries = vec![entry(day(2024, 2, 27), true), entry(day(2024, 1, 29), true)];
        let before = entries.clone();
        let _ = CyclePredictor::predict(&entries, now());
        assert_eq!(entries, before);
    }
}
