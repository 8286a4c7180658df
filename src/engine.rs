//! Engine orchestration
//!
//! The free functions in `stats`, `predictor`, `phase`, and `insights` each
//! validate and sort their input on every call. `CycleEngine` is the
//! convenience wrapper for callers issuing repeated queries against one
//! history snapshot: it validates and sorts once, then answers from that
//! snapshot. It holds input only, never cached results, so every answer is
//! still a pure function of the snapshot.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::insights;
use crate::phase;
use crate::predictor;
use crate::stats;
use crate::types::{
    CycleInterval, CycleStats, PhaseAssignment, PredictionReport, RegularityRating,
    SymptomInsights, SymptomLog,
};

/// One validated, sorted snapshot of the interval history
#[derive(Debug, Clone)]
pub struct CycleEngine {
    intervals: Vec<CycleInterval>,
}

impl CycleEngine {
    /// Validate the supplied history and sort it by start date.
    ///
    /// Takes ownership of the vector; the caller's own collections are
    /// never touched.
    pub fn new(intervals: Vec<CycleInterval>) -> Result<Self, EngineError> {
        let intervals = crate::history::prepare(&intervals)?;
        Ok(Self { intervals })
    }

    /// The validated history, sorted by start date ascending
    pub fn intervals(&self) -> &[CycleInterval] {
        &self.intervals
    }

    /// Aggregate statistics over the snapshot
    pub fn statistics(&self) -> CycleStats {
        stats::compute_from_sorted(&self.intervals)
    }

    /// Regularity rating, present once two or more intervals exist
    pub fn regularity(&self) -> Option<RegularityRating> {
        self.statistics().regularity.map(stats::regularity_rating)
    }

    /// Next-cycle prediction
    pub fn predict(&self) -> PredictionReport {
        predictor::predict_from_sorted(&self.intervals)
    }

    /// Phase assignment for an arbitrary calendar date
    pub fn classify(&self, date: NaiveDate) -> PhaseAssignment {
        phase::classify_from_sorted(&self.intervals, date)
    }

    /// Full symptom analysis against this snapshot; `now` anchors trends
    pub fn insights(&self, logs: &[SymptomLog], now: NaiveDate) -> SymptomInsights {
        insights::analyze_from_sorted(logs, &self.intervals, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_interval(start: &str, end: &str) -> CycleInterval {
        CycleInterval::new(
            NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        )
    }

    fn make_engine() -> CycleEngine {
        CycleEngine::new(vec![
            make_interval("2024-01-29", "2024-02-02"),
            make_interval("2024-01-01", "2024-01-05"),
        ])
        .unwrap()
    }

    #[test]
    fn engine_sorts_its_snapshot_once() {
        let engine = make_engine();
        assert_eq!(engine.intervals()[0].start_date, date(2024, 1, 1));
        assert_eq!(engine.intervals()[1].start_date, date(2024, 1, 29));
    }

    #[test]
    fn engine_rejects_invalid_history() {
        let result = CycleEngine::new(vec![make_interval("2024-01-05", "2024-01-01")]);
        assert!(result.is_err());
    }

    #[test]
    fn engine_answers_match_free_functions() {
        let intervals = vec![
            make_interval("2024-01-01", "2024-01-05"),
            make_interval("2024-01-29", "2024-02-02"),
        ];
        let engine = CycleEngine::new(intervals.clone()).unwrap();

        assert_eq!(
            engine.statistics(),
            stats::compute_statistics(&intervals).unwrap()
        );
        assert_eq!(engine.predict(), predictor::predict(&intervals).unwrap());
        assert_eq!(
            engine.classify(date(2024, 1, 15)),
            phase::classify_phase(&intervals, date(2024, 1, 15)).unwrap()
        );
    }

    #[test]
    fn engine_runs_full_analysis() {
        let engine = make_engine();
        let logs = vec![SymptomLog {
            id: None,
            date: date(2024, 1, 2),
            symptoms: ["cramps".to_string()].into_iter().collect::<BTreeSet<_>>(),
            cycle_day: Some(2),
        }];

        let insights = engine.insights(&logs, date(2024, 2, 15));
        assert_eq!(insights.most_common[0].tag, "cramps");
        assert_eq!(insights.by_phase[&Phase::Menstrual][0].tag, "cramps");
    }

    #[test]
    fn regularity_absent_below_two_intervals() {
        let engine = CycleEngine::new(vec![make_interval("2024-01-01", "2024-01-05")]).unwrap();
        assert!(engine.regularity().is_none());

        let engine = make_engine();
        let rating = engine.regularity().unwrap();
        assert_eq!(rating.label, "Very Regular");
        assert_eq!(rating.score, 100.0);
    }
}
