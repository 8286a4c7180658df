//! Phase classification
//!
//! Assigns a cycle phase and 1-based phase day to an arbitrary calendar date,
//! given the full interval history. Classification runs in a fixed priority
//! order: menstrual, then ovulation, then luteal, then follicular. The first
//! matching window wins, so the priority order is load-bearing.
//!
//! Historical classification anchors ovulation at each cycle's observed
//! midpoint. This intentionally differs from the predictor's fixed 14-day
//! luteal assumption, which only applies to future cycles.

use chrono::{Duration, NaiveDate};

use crate::error::EngineError;
use crate::history;
use crate::types::{CycleInterval, Phase, PhaseAssignment};

/// Half-width of the ovulation window around the cycle midpoint, in days
pub const OVULATION_WINDOW_HALF_DAYS: i64 = 2;

/// Classify a calendar date into a cycle phase.
///
/// Tolerates unsorted input; errors only on a structurally invalid interval.
/// Dates outside every known window classify as `Phase::Unknown` with
/// `phase_day = 1`.
pub fn classify_phase(
    intervals: &[CycleInterval],
    query: NaiveDate,
) -> Result<PhaseAssignment, EngineError> {
    let sorted = history::prepare(intervals)?;
    Ok(classify_from_sorted(&sorted, query))
}

/// Classification over an already validated, sorted history
pub(crate) fn classify_from_sorted(sorted: &[CycleInterval], query: NaiveDate) -> PhaseAssignment {
    // Pass 1: menstrual, the query falls inside a recorded period
    for interval in sorted {
        if interval.contains(query) {
            return assignment(Phase::Menstrual, interval.start_date, query);
        }
    }

    // Pass 2: ovulation, a +/- 2 day window around each cycle's midpoint
    for pair in sorted.windows(2) {
        let midpoint = cycle_midpoint(&pair[0], &pair[1]);
        let window_start = midpoint - Duration::days(OVULATION_WINDOW_HALF_DAYS);
        let window_end = midpoint + Duration::days(OVULATION_WINDOW_HALF_DAYS);
        if query >= window_start && query <= window_end {
            return assignment(Phase::Ovulation, window_start, query);
        }
    }

    // Pass 3: luteal, between the midpoint and the next period start
    for pair in sorted.windows(2) {
        let midpoint = cycle_midpoint(&pair[0], &pair[1]);
        let window_start = midpoint + Duration::days(1);
        let window_end = pair[1].start_date - Duration::days(1);
        if query >= window_start && query <= window_end {
            return assignment(Phase::Luteal, window_start, query);
        }
    }

    // Pass 4: follicular, between the period end and the midpoint
    for pair in sorted.windows(2) {
        let midpoint = cycle_midpoint(&pair[0], &pair[1]);
        let window_start = pair[0].end_date + Duration::days(1);
        let window_end = midpoint - Duration::days(1);
        if query >= window_start && query <= window_end {
            return assignment(Phase::Follicular, window_start, query);
        }
    }

    PhaseAssignment {
        phase: Phase::Unknown,
        phase_day: 1,
    }
}

/// Observed ovulation estimate for a completed cycle: start plus half the
/// cycle duration, floored to whole days
fn cycle_midpoint(current: &CycleInterval, next: &CycleInterval) -> NaiveDate {
    let cycle_duration = history::days_between(current.start_date, next.start_date);
    current.start_date + Duration::days(cycle_duration / 2)
}

fn assignment(phase: Phase, window_start: NaiveDate, query: NaiveDate) -> PhaseAssignment {
    PhaseAssignment {
        phase,
        phase_day: (history::days_between(window_start, query) + 1) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_interval(start: &str, end: &str) -> CycleInterval {
        CycleInterval::new(
            NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        )
    }

    fn two_cycle_history() -> Vec<CycleInterval> {
        vec![
            make_interval("2024-01-01", "2024-01-05"),
            make_interval("2024-01-29", "2024-02-02"),
        ]
    }

    #[test]
    fn menstrual_day_within_interval() {
        let assignment = classify_phase(&two_cycle_history(), date(2024, 1, 3)).unwrap();
        assert_eq!(assignment.phase, Phase::Menstrual);
        assert_eq!(assignment.phase_day, 3);
    }

    #[test]
    fn ovulation_at_cycle_midpoint() {
        // 28-day cycle: midpoint Jan 15, window Jan 13-17
        let assignment = classify_phase(&two_cycle_history(), date(2024, 1, 15)).unwrap();
        assert_eq!(assignment.phase, Phase::Ovulation);
        assert_eq!(assignment.phase_day, 3);
    }

    #[test]
    fn ovulation_window_edges() {
        let intervals = two_cycle_history();
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 13)).unwrap().phase,
            Phase::Ovulation
        );
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 17)).unwrap().phase,
            Phase::Ovulation
        );
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 12)).unwrap().phase,
            Phase::Follicular
        );
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 18)).unwrap().phase,
            Phase::Luteal
        );
    }

    #[test]
    fn follicular_between_period_end_and_ovulation() {
        let assignment = classify_phase(&two_cycle_history(), date(2024, 1, 8)).unwrap();
        assert_eq!(assignment.phase, Phase::Follicular);
        // Window opens Jan 6, so Jan 8 is day 3
        assert_eq!(assignment.phase_day, 3);
    }

    #[test]
    fn luteal_between_ovulation_and_next_period() {
        let assignment = classify_phase(&two_cycle_history(), date(2024, 1, 25)).unwrap();
        assert_eq!(assignment.phase, Phase::Luteal);
        // Window opens Jan 16 (midpoint + 1), so Jan 25 is day 10
        assert_eq!(assignment.phase_day, 10);
    }

    #[test]
    fn menstrual_wins_over_other_windows() {
        // Second period start is inside the luteal span of the first cycle
        let assignment = classify_phase(&two_cycle_history(), date(2024, 1, 29)).unwrap();
        assert_eq!(assignment.phase, Phase::Menstrual);
        assert_eq!(assignment.phase_day, 1);
    }

    #[test]
    fn dates_outside_history_are_unknown() {
        let intervals = two_cycle_history();
        let before = classify_phase(&intervals, date(2023, 12, 1)).unwrap();
        assert_eq!(before.phase, Phase::Unknown);
        assert_eq!(before.phase_day, 1);
        let after = classify_phase(&intervals, date(2024, 3, 1)).unwrap();
        assert_eq!(after.phase, Phase::Unknown);
    }

    #[test]
    fn empty_history_is_unknown() {
        let assignment = classify_phase(&[], date(2024, 1, 1)).unwrap();
        assert_eq!(assignment.phase, Phase::Unknown);
    }

    #[test]
    fn every_date_in_history_span_gets_a_phase() {
        let intervals = vec![
            make_interval("2024-01-01", "2024-01-05"),
            make_interval("2024-01-29", "2024-02-02"),
            make_interval("2024-02-27", "2024-03-02"),
        ];
        let mut day = date(2024, 1, 1);
        let end = date(2024, 3, 2);
        while day <= end {
            let assignment = classify_phase(&intervals, day).unwrap();
            assert_ne!(
                assignment.phase,
                Phase::Unknown,
                "no phase assigned for {}",
                day
            );
            assert!(assignment.phase_day >= 1);
            day += Duration::days(1);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let intervals = two_cycle_history();
        let first = classify_phase(&intervals, date(2024, 1, 20)).unwrap();
        let second = classify_phase(&intervals, date(2024, 1, 20)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn classification_tolerates_unsorted_input() {
        let mut intervals = two_cycle_history();
        intervals.reverse();
        let assignment = classify_phase(&intervals, date(2024, 1, 15)).unwrap();
        assert_eq!(assignment.phase, Phase::Ovulation);
    }

    #[test]
    fn short_cycle_midpoint_floors() {
        // 27-day cycle: midpoint = start + 13 days = Jan 14, window Jan 12-16
        let intervals = vec![
            make_interval("2024-01-01", "2024-01-05"),
            make_interval("2024-01-28", "2024-02-01"),
        ];
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 12)).unwrap().phase,
            Phase::Ovulation
        );
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 16)).unwrap().phase,
            Phase::Ovulation
        );
        assert_eq!(
            classify_phase(&intervals, date(2024, 1, 17)).unwrap().phase,
            Phase::Luteal
        );
    }
}
