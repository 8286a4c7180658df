//! Cyclesense CLI - Command-line interface for the cycle analytics engine
//!
//! Commands:
//! - stats: compute aggregate cycle statistics
//! - predict: project the next period, ovulation date, and fertile window
//! - phase: classify a calendar date into a cycle phase
//! - insights: mine the symptom log for patterns and trends
//! - predict-day: list symptoms historically seen on a given cycle day
//!
//! Interval and log inputs are JSON arrays read from a file or stdin (`-`).

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use cyclesense::{
    analyze_symptoms, classify_phase, compute_statistics, predict, predict_symptoms_for_day,
    regularity_rating, CycleInterval, EngineError, SymptomLog, ENGINE_VERSION, PRODUCER_NAME,
};

/// Cyclesense - on-device cycle prediction and phase analytics engine
#[derive(Parser)]
#[command(name = "cyclesense")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Cycle statistics, predictions, and symptom insights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute aggregate cycle statistics
    Stats {
        /// Intervals JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project the next period, ovulation date, and fertile window
    Predict {
        /// Intervals JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a calendar date into a cycle phase
    Phase {
        /// Intervals JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Date to classify (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mine the symptom log for patterns and trends
    Insights {
        /// Intervals JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Symptom logs JSON file
        #[arg(short, long)]
        logs: PathBuf,

        /// Anchor date for trend analysis (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List symptoms historically seen on a given cycle day
    PredictDay {
        /// Symptom logs JSON file (use - for stdin)
        #[arg(short, long)]
        logs: PathBuf,

        /// 1-based cycle day to look up
        #[arg(short, long)]
        cycle_day: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid input JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", PRODUCER_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Stats { input, json } => cmd_stats(&input, json),
        Commands::Predict { input, json } => cmd_predict(&input, json),
        Commands::Phase { input, date, json } => cmd_phase(&input, date, json),
        Commands::Insights {
            input,
            logs,
            as_of,
            json,
        } => {
            let now = as_of.unwrap_or_else(|| Local::now().date_naive());
            cmd_insights(&input, &logs, now, json)
        }
        Commands::PredictDay {
            logs,
            cycle_day,
            json,
        } => cmd_predict_day(&logs, cycle_day, json),
    }
}

fn cmd_stats(input: &Path, json: bool) -> Result<(), CliError> {
    let intervals = read_intervals(input)?;
    let stats = compute_statistics(&intervals)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Cycle Statistics");
    println!("================");
    println!("Recorded cycles:   {}", stats.total_cycles);
    match stats.avg_cycle_length {
        Some(avg) => println!("Avg cycle length:  {:.1} days", avg),
        None => println!("Avg cycle length:  not enough data"),
    }
    match stats.avg_period_duration {
        Some(avg) => println!("Avg period length: {:.1} days", avg),
        None => println!("Avg period length: not enough data"),
    }
    match stats.regularity {
        Some(stdev) => {
            let rating = regularity_rating(stdev);
            println!(
                "Regularity:        {} (stdev {:.1} days, score {:.0}/100)",
                rating.label, stdev, rating.score
            );
        }
        None => println!("Regularity:        not enough data"),
    }
    if let (Some(shortest), Some(longest)) = (stats.shortest_cycle, stats.longest_cycle) {
        println!("Cycle range:       {} - {} days", shortest, longest);
    }
    if let Some(last) = stats.last_period_start {
        println!("Last period start: {}", last);
    }

    Ok(())
}

fn cmd_predict(input: &Path, json: bool) -> Result<(), CliError> {
    let intervals = read_intervals(input)?;
    let report = predict(&intervals)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.prediction {
        Some(prediction) => {
            println!("Next Cycle Prediction");
            println!("=====================");
            println!(
                "Next period:    {} to {}",
                prediction.next_period_start, prediction.next_period_end
            );
            println!("Ovulation:      {}", prediction.ovulation_date);
            println!(
                "Fertile window: {} to {}",
                prediction.fertile_window.start, prediction.fertile_window.end
            );
            println!("Note:           {}", prediction.confidence_note);
        }
        None => println!("No prediction available: {}", report.message),
    }

    Ok(())
}

fn cmd_phase(input: &Path, date: NaiveDate, json: bool) -> Result<(), CliError> {
    let intervals = read_intervals(input)?;
    let assignment = classify_phase(&intervals, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assignment)?);
    } else {
        println!(
            "{} is {} (day {})",
            date,
            assignment.phase.as_str(),
            assignment.phase_day
        );
    }

    Ok(())
}

fn cmd_insights(
    input: &Path,
    logs_path: &Path,
    now: NaiveDate,
    json: bool,
) -> Result<(), CliError> {
    let intervals = read_intervals(input)?;
    let logs = read_logs(logs_path)?;
    let insights = analyze_symptoms(&logs, &intervals, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("Symptom Insights (as of {})", now);
    println!("==========================");

    println!("\nMost common:");
    if insights.most_common.is_empty() {
        println!("  (no symptom logs)");
    }
    for entry in &insights.most_common {
        println!("  {} - {} logs ({}%)", entry.tag, entry.count, entry.pct);
    }

    println!("\nBy phase:");
    for (phase, entries) in &insights.by_phase {
        if entries.is_empty() {
            continue;
        }
        println!("  {}:", phase.as_str());
        for entry in entries {
            println!("    {} ({}%)", entry.tag, entry.pct);
        }
    }

    if !insights.correlated_pairs.is_empty() {
        println!("\nOften together:");
        for pair in &insights.correlated_pairs {
            println!(
                "  {} + {} - {} logs ({}%)",
                pair.tag_a, pair.tag_b, pair.count, pair.pct
            );
        }
    }

    if !insights.trends.is_empty() {
        println!("\nTrends (last 3 months):");
        for trend in &insights.trends {
            let direction = if trend.increasing { "up" } else { "down" };
            println!("  {} {} {:+.0} pts", trend.tag, direction, trend.change_pct);
        }
    }

    Ok(())
}

fn cmd_predict_day(logs_path: &Path, cycle_day: u32, json: bool) -> Result<(), CliError> {
    let logs = read_logs(logs_path)?;
    let predicted = predict_symptoms_for_day(&logs, cycle_day);

    if json {
        println!("{}", serde_json::to_string_pretty(&predicted)?);
    } else if predicted.is_empty() {
        println!("No symptoms on record for cycle day {}", cycle_day);
    } else {
        println!("Likely on cycle day {}: {}", cycle_day, predicted.join(", "));
    }

    Ok(())
}

// Helper functions

fn read_intervals(path: &Path) -> Result<Vec<CycleInterval>, CliError> {
    let data = read_input(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn read_logs(path: &Path) -> Result<Vec<SymptomLog>, CliError> {
    let data = read_input(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading JSON from terminal stdin; end with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
