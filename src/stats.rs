//! Cycle statistics
//!
//! Reduces the interval history to aggregate metrics: average cycle length,
//! average period duration, and regularity (population standard deviation of
//! cycle lengths). Below two intervals the averages are undefined and stay
//! `None` rather than collapsing to zero.

use crate::error::EngineError;
use crate::history;
use crate::types::{CycleInterval, CycleStats, RegularityRating};

/// Stdev below which cycles are rated "Very Regular"
const VERY_REGULAR_STDEV: f64 = 2.0;
/// Stdev below which cycles are rated "Regular"
const REGULAR_STDEV: f64 = 4.0;
/// Stdev below which cycles are rated "Somewhat Regular"
const SOMEWHAT_REGULAR_STDEV: f64 = 6.0;
/// Per-stdev-day penalty applied to the 0-100 display score
const SCORE_PENALTY_PER_STDEV: f64 = 8.0;

/// Compute aggregate statistics over the interval history.
///
/// Tolerates unsorted input; errors only on a structurally invalid interval.
pub fn compute_statistics(intervals: &[CycleInterval]) -> Result<CycleStats, EngineError> {
    let sorted = history::prepare(intervals)?;
    Ok(compute_from_sorted(&sorted))
}

/// Statistics over an already validated, sorted history
pub(crate) fn compute_from_sorted(sorted: &[CycleInterval]) -> CycleStats {
    let last = sorted.last();

    if sorted.len() < 2 {
        return CycleStats {
            total_cycles: sorted.len(),
            avg_cycle_length: None,
            avg_period_duration: None,
            regularity: None,
            shortest_cycle: None,
            longest_cycle: None,
            last_period_start: last.map(|interval| interval.start_date),
            last_period_end: last.map(|interval| interval.end_date),
        };
    }

    let cycle_lengths: Vec<f64> = sorted
        .windows(2)
        .map(|pair| history::days_between(pair[0].start_date, pair[1].start_date) as f64)
        .collect();

    let period_durations: Vec<f64> = sorted
        .iter()
        .map(|interval| interval.duration_days() as f64)
        .collect();

    CycleStats {
        total_cycles: sorted.len(),
        avg_cycle_length: Some(mean(&cycle_lengths)),
        avg_period_duration: Some(mean(&period_durations)),
        regularity: Some(population_stdev(&cycle_lengths)),
        shortest_cycle: cycle_lengths.iter().map(|&len| len as i64).min(),
        longest_cycle: cycle_lengths.iter().map(|&len| len as i64).max(),
        last_period_start: last.map(|interval| interval.start_date),
        last_period_end: last.map(|interval| interval.end_date),
    }
}

/// Map a cycle-length stdev to a qualitative label and a 0-100 display score
pub fn regularity_rating(stdev: f64) -> RegularityRating {
    let label = if stdev < VERY_REGULAR_STDEV {
        "Very Regular"
    } else if stdev < REGULAR_STDEV {
        "Regular"
    } else if stdev < SOMEWHAT_REGULAR_STDEV {
        "Somewhat Regular"
    } else {
        "Irregular"
    };

    RegularityRating {
        label: label.to_string(),
        score: (100.0 - stdev * SCORE_PENALTY_PER_STDEV).max(0.0),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (biased) standard deviation: divides by n, not n-1
fn population_stdev(values: &[f64]) -> f64 {
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
