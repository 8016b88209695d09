#[macro_use]
extern crate log;

use std::{io, path::PathBuf};

use anyhow::anyhow;
use chrono::{Local, NaiveDateTime};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use mindcycle::{
    CyclePredictor, EntryHistory, PREDICTION_WINDOW_MONTHS,
    calendar::{CalendarMonth, month_view},
};

#[derive(Parser)]
pub struct MindCycleCli {
    /// JSON file holding the logged entries
    #[arg(env, long)]
    pub entries_file: Option<PathBuf>,
    /// Reference time for the prediction, defaults to the current local time
    #[arg(env, long)]
    pub now: Option<NaiveDateTime>,
    #[clap(subcommand)]
    pub subcommand: MindCycleCommand,
}

#[derive(Subcommand)]
pub enum MindCycleCommand {
    ///
    /// Predict the next period and ovulation
    ///
    Predict {
        #[arg(long, default_value_t = PREDICTION_WINDOW_MONTHS)]
        window_months: u32,
    },
    ///
    /// List logged entries, newest first
    ///
    Entries {
        #[arg(long, default_value_t = PREDICTION_WINDOW_MONTHS)]
        window_months: u32,
    },
    ///
    /// List period starts and the cycle lengths between them
    ///
    PeriodStarts,
    ///
    /// Print a month with logged and predicted period days
    ///
    Calendar {
        /// Month as YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<CalendarMonth>,
    },
    ///
    /// Generate shell completions
    ///
    Completions { shell: Shell },
}

fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = MindCycleCli::parse();
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());

    if let MindCycleCommand::Completions { shell } = cli.subcommand {
        clap_complete::generate(
            shell,
            &mut MindCycleCli::command(),
            "mindcycle",
            &mut io::stdout(),
        );
        return Ok(());
    }

    let entries_file = cli
        .entries_file
        .ok_or(anyhow!("No entries file given, set --entries-file or ENTRIES_FILE"))?;
    let history = EntryHistory::load(&entries_file)?;

    match cli.subcommand {
        MindCycleCommand::Predict { window_months } => {
            match history.predict(now, window_months)? {
                Some(prediction) => println!("{}", prediction),
                None => println!("Not enough data to predict the next cycle"),
            }
            Ok(())
        }
        MindCycleCommand::Entries { window_months } => {
            let entries = history.recent(now, window_months);
            info!("{} entries in the last {} months", entries.len(), window_months);

            for entry in entries {
                let mut line = format!(
                    "{}  {:<10} {:<13}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.mood.to_string(),
                    entry.cycle_phase.to_string()
                );
                if entry.is_period_start {
                    line.push_str(" [period start]");
                } else if entry.is_period {
                    line.push_str(" [period]");
                }
                if !entry.symptoms.is_empty() {
                    line.push_str(&format!(" symptoms: {}", entry.symptoms.join(", ")));
                }
                if let Some(note) = &entry.note {
                    line.push_str(&format!(" - {}", note));
                }
                println!("{}", line);
            }
            Ok(())
        }
        MindCycleCommand::PeriodStarts => {
            for entry in history.period_starts() {
                println!("{}", entry.timestamp.date());
            }

            let lengths = CyclePredictor::cycle_lengths(history.entries());
            if lengths.is_empty() {
                println!("No plausible cycles logged");
            } else {
                let lengths = lengths.iter().map(i64::to_string).collect::<Vec<_>>();
                println!("Cycle lengths (days): {}", lengths.join(", "));
            }
            Ok(())
        }
        MindCycleCommand::Calendar { month } => {
            let month = month.unwrap_or_else(|| CalendarMonth::containing(now.date()));
            let prediction = history.predict(now, PREDICTION_WINDOW_MONTHS)?;
            if prediction.is_none() {
                warn!("No prediction available, showing logged days only");
            }

            for day in month_view(month, &history, prediction.as_ref()) {
                println!("{}", day);
            }
            Ok(())
        }
        MindCycleCommand::Completions { .. } => Ok(()),
    }
}
