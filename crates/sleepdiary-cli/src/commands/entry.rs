//! Diary entry commands: record, compute, list, show.

use std::io;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use serde::Serialize;

use sleepdiary_core::error::Result;
use sleepdiary_core::{
    CollectError, ComputedMetrics, Config, CoreError, Database, DiaryCollector, RawEntry,
    RecordAssembler, RoundingPolicy, SleepRecord, StdinLines,
};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Answer the diary questions and save the entry
    Record {
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Override the configured rounding policy
        #[arg(long)]
        rounding: Option<RoundingPolicy>,
    },
    /// Compute efficiency for a night without saving it
    Compute {
        /// Bedtime (HH:MM)
        #[arg(long)]
        bedtime: String,
        /// Planned wake time (HH:MM)
        #[arg(long)]
        wake_target: String,
        /// Minutes asleep
        #[arg(long, default_value_t = 0)]
        total: u32,
        /// Minutes awake during the night
        #[arg(long, default_value_t = 0)]
        awake: u32,
        /// Minutes to fall asleep
        #[arg(long, default_value_t = 0)]
        latency: u32,
        /// Override the configured rounding policy
        #[arg(long)]
        rounding: Option<RoundingPolicy>,
    },
    /// List recent entries, newest first
    List {
        /// Number of entries (defaults to display.recent_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry as JSON
    Show {
        /// Entry id
        id: i64,
    },
}

#[derive(Serialize)]
struct Preview {
    target_window_minutes: u32,
    #[serde(flatten)]
    metrics: ComputedMetrics,
    rounding: RoundingPolicy,
}

pub fn run(action: EntryAction) -> Result<()> {
    let config = Config::load_or_default();

    match action {
        EntryAction::Record { date, rounding } => record(&config, date, rounding),
        EntryAction::Compute {
            bedtime,
            wake_target,
            total,
            awake,
            latency,
            rounding,
        } => {
            let raw = RawEntry {
                entry_date: today(),
                bedtime,
                wake_time_target: wake_target.clone(),
                wake_time_actual: wake_target,
                total_sleep_minutes: total,
                awake_minutes: awake,
                sleep_latency_minutes: latency,
                ..RawEntry::default()
            };
            let assembler = assembler_for(&config, rounding);
            let preview = Preview {
                target_window_minutes: assembler.target_window(&raw),
                metrics: assembler.compute(&raw),
                rounding: assembler.policy(),
            };
            println!("{}", serde_json::to_string_pretty(&preview)?);
            Ok(())
        }
        EntryAction::List { limit, json } => {
            let db = Database::open(&config)?;
            let records = db.list_recent(limit.unwrap_or(config.display.recent_limit))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No entries yet.");
            } else {
                for (i, record) in records.iter().enumerate() {
                    println!("{}. {}", i + 1, summary_line(record, config.display.decimals));
                }
            }
            Ok(())
        }
        EntryAction::Show { id } => {
            let db = Database::open(&config)?;
            let record = db.get(id)?.ok_or(CoreError::EntryNotFound(id))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

fn record(
    config: &Config,
    date: Option<String>,
    rounding: Option<RoundingPolicy>,
) -> Result<()> {
    let entry_date = match date {
        Some(input) => match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(day) => day.format("%Y-%m-%d").to_string(),
            Err(source) => return Err(CoreError::InvalidDate { input, source }),
        },
        None => today(),
    };

    let db = Database::open(config)?;
    let mut collector = DiaryCollector::new(StdinLines::new(), io::stdout());
    let raw = match collector.collect(&entry_date) {
        Ok(raw) => raw,
        Err(CollectError::UserExit) => {
            println!("\nGoodbye!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let saved = db.save(&assembler_for(config, rounding).assemble(raw))?;
    let decimals = config.display.decimals;

    println!();
    println!("Entry saved with ID: {}", saved.id().unwrap_or_default());
    println!(
        "Sleep efficiency: {:.*}%",
        decimals,
        saved.efficiency_actual_pct()
    );
    println!(
        "Efficiency vs target: {:.*}%",
        decimals,
        saved.efficiency_vs_target_pct()
    );
    println!("Total sleep: {:.1} hours", saved.total_sleep_hours());
    Ok(())
}

fn assembler_for(config: &Config, rounding: Option<RoundingPolicy>) -> RecordAssembler {
    rounding.map_or_else(|| config.assembler(), RecordAssembler::new)
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn summary_line(record: &SleepRecord, decimals: usize) -> String {
    format!(
        "{} - {:.1} hrs sleep, {:.*}% efficiency, {:.*}% of target, quality {}/5",
        record.entry_date(),
        record.total_sleep_hours(),
        decimals,
        record.efficiency_actual_pct(),
        decimals,
        record.efficiency_vs_target_pct(),
        record.raw().sleep_quality_score,
    )
}
