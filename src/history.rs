//! Interval history preparation
//!
//! Every public engine operation funnels its interval input through this
//! module: validation fails fast on malformed intervals, and the adjacent-pair
//! computations downstream always run over a clone sorted by start date.
//! Caller-supplied collections are never mutated.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::types::CycleInterval;

/// Calendar days from `from` to `to` (negative when `to` precedes `from`)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Reject intervals whose end date precedes their start date
pub fn validate(intervals: &[CycleInterval]) -> Result<(), EngineError> {
    for interval in intervals {
        if interval.end_date < interval.start_date {
            return Err(EngineError::InvalidInterval {
                start: interval.start_date,
                end: interval.end_date,
            });
        }
    }
    Ok(())
}

/// Validate and return a copy of the history sorted by start date ascending.
///
/// Input order is not trusted; ties on start date keep their input order.
pub fn prepare(intervals: &[CycleInterval]) -> Result<Vec<CycleInterval>, EngineError> {
    validate(intervals)?;
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|interval| interval.start_date);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_interval(start: (i32, u32, u32), end: (i32, u32, u32)) -> CycleInterval {
        CycleInterval::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 29)), 28);
        assert_eq!(days_between(date(2024, 1, 29), date(2024, 1, 1)), -28);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn prepare_sorts_unordered_input() {
        let intervals = vec![
            make_interval((2024, 3, 1), (2024, 3, 5)),
            make_interval((2024, 1, 1), (2024, 1, 5)),
            make_interval((2024, 2, 1), (2024, 2, 5)),
        ];
        let sorted = prepare(&intervals).unwrap();
        assert_eq!(sorted[0].start_date, date(2024, 1, 1));
        assert_eq!(sorted[1].start_date, date(2024, 2, 1));
        assert_eq!(sorted[2].start_date, date(2024, 3, 1));
        // Caller's vector is untouched
        assert_eq!(intervals[0].start_date, date(2024, 3, 1));
    }

    #[test]
    fn prepare_rejects_inverted_interval() {
        let intervals = vec![make_interval((2024, 1, 5), (2024, 1, 1))];
        let err = prepare(&intervals).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }

    #[test]
    fn prepare_accepts_empty_history() {
        assert!(prepare(&[]).unwrap().is_empty());
    }
}
