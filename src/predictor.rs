//! Next-cycle prediction
//!
//! Projects the next period window, ovulation date, and fertile window from
//! the interval history. Three regimes apply, selected by data volume:
//! zero intervals produce no prediction, a single interval falls back to a
//! 28-day default cycle, and two or more intervals use the computed averages.
//!
//! The fixed-duration heuristics here (28-day default cycle, 14-day luteal
//! phase, 5-day fallback period) are product constants, not derived values.

use chrono::Duration;

use crate::error::EngineError;
use crate::history;
use crate::stats;
use crate::types::{CycleInterval, FertileWindow, Prediction, PredictionReport};

/// Assumed cycle length when only one period is on record
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;
/// Period duration used when no average duration is available
pub const FALLBACK_PERIOD_DURATION_DAYS: i64 = 5;
/// Assumed span between ovulation and the next period start
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Fertile window opens this many days before ovulation
pub const FERTILE_WINDOW_LEAD_DAYS: i64 = 5;
/// Fertile window closes this many days after ovulation
pub const FERTILE_WINDOW_TRAIL_DAYS: i64 = 1;

/// Predict the next cycle from the interval history.
///
/// Never fails for sparse data: with zero intervals the report carries
/// `prediction: None` and a "no data" message. Errors only on a
/// structurally invalid interval.
pub fn predict(intervals: &[CycleInterval]) -> Result<PredictionReport, EngineError> {
    let sorted = history::prepare(intervals)?;
    Ok(predict_from_sorted(&sorted))
}

/// Prediction over an already validated, sorted history
pub(crate) fn predict_from_sorted(sorted: &[CycleInterval]) -> PredictionReport {
    let last = match sorted.last() {
        Some(last) => last,
        None => {
            return PredictionReport {
                message: "no data".to_string(),
                prediction: None,
            };
        }
    };

    let (next_period_start, period_duration, confidence_note) = if sorted.len() == 1 {
        // Single interval: default cycle length, observed period duration
        let duration = last.duration_days();
        let note = format!(
            "based on a default {}-day cycle; only one period on record",
            DEFAULT_CYCLE_LENGTH_DAYS
        );
        (
            last.start_date + Duration::days(DEFAULT_CYCLE_LENGTH_DAYS),
            duration,
            note,
        )
    } else {
        let cycle_stats = stats::compute_from_sorted(sorted);
        let avg_cycle = cycle_stats
            .avg_cycle_length
            .unwrap_or(DEFAULT_CYCLE_LENGTH_DAYS as f64);
        let duration = cycle_stats
            .avg_period_duration
            .map(|avg| avg.round() as i64)
            .unwrap_or(FALLBACK_PERIOD_DURATION_DAYS);
        let note = match cycle_stats.regularity {
            Some(stdev) => {
                let rating = stats::regularity_rating(stdev);
                format!(
                    "based on {} recorded cycles; {} (stdev {:.1} days)",
                    sorted.len(),
                    rating.label,
                    stdev
                )
            }
            None => format!("based on {} recorded cycles", sorted.len()),
        };
        (
            last.start_date + Duration::days(avg_cycle.round() as i64),
            duration,
            note,
        )
    };

    let next_period_end = next_period_start + Duration::days(period_duration - 1);
    let ovulation_date = next_period_start - Duration::days(LUTEAL_PHASE_DAYS);
    let fertile_window = FertileWindow {
        start: ovulation_date - Duration::days(FERTILE_WINDOW_LEAD_DAYS),
        end: ovulation_date + Duration::days(FERTILE_WINDOW_TRAIL_DAYS),
    };

    PredictionReport {
        message: "prediction computed".to_string(),
        prediction: Some(Prediction {
            next_period_start,
            next_period_end,
            ovulation_date,
            fertile_window,
            confidence_note,
        }),
    }
}
