//! Core types for the Cyclesense engine
//!
//! This module defines the data structures that cross the engine boundary:
//! observed period intervals and symptom logs on the way in, statistics,
//! predictions, phase assignments, and symptom insights on the way out.
//! All dates are naive local calendar dates, midnight-normalized.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Cycle phase assigned to a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
    Unknown,
}

impl Phase {
    /// All phases, in classification priority order
    pub const ALL: [Phase; 5] = [
        Phase::Menstrual,
        Phase::Ovulation,
        Phase::Luteal,
        Phase::Follicular,
        Phase::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menstrual => "menstrual",
            Phase::Follicular => "follicular",
            Phase::Ovulation => "ovulation",
            Phase::Luteal => "luteal",
            Phase::Unknown => "unknown",
        }
    }
}

/// One observed period, defined by an inclusive start/end calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInterval {
    /// Record identifier, if the collaborator assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CycleInterval {
    /// Interval without a record identifier
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            start_date,
            end_date,
        }
    }

    /// Inclusive day-span of the period: `(end - start) + 1`
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether `date` falls within `[start_date, end_date]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// One dated symptom observation (multiple tags per log)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub date: NaiveDate,
    /// Symptom tags observed on this date (set semantics, stable order)
    pub symptoms: BTreeSet<String>,
    /// 1-based offset from the start of the interval containing `date`, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_day: Option<u32>,
}

/// Aggregate metrics reduced from the interval history.
///
/// The three core fields are `None` (never `NaN` or `0`) while fewer than
/// two intervals exist; callers must branch on presence, not on zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    /// Number of recorded intervals
    pub total_cycles: usize,
    /// Mean days between consecutive period starts
    pub avg_cycle_length: Option<f64>,
    /// Mean inclusive period duration in days
    pub avg_period_duration: Option<f64>,
    /// Population standard deviation of cycle lengths (lower = more regular)
    pub regularity: Option<f64>,
    /// Shortest observed cycle length in days
    pub shortest_cycle: Option<i64>,
    /// Longest observed cycle length in days
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

/// Qualitative regularity rating derived from the cycle-length stdev
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularityRating {
    /// "Very Regular", "Regular", "Somewhat Regular", or "Irregular"
    pub label: String,
    /// Normalized display value in `[0, 100]` for progress-bar rendering
    pub score: f64,
}

/// Span of elevated conception likelihood around the estimated ovulation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Forward-looking projection of the next cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub next_period_start: NaiveDate,
    pub next_period_end: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window: FertileWindow,
    /// Human-readable note on how much history backs this projection
    pub confidence_note: String,
}

/// Prediction result wrapper.
///
/// Sparse data is modeled as a value, not a failure: with zero recorded
/// intervals `prediction` is `None` and `message` explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub message: String,
    pub prediction: Option<Prediction>,
}

/// Phase assigned to a queried calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAssignment {
    pub phase: Phase,
    /// 1-based day offset within the assigned phase window
    pub phase_day: u32,
}

/// A symptom tag with its occurrence count and share of all logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
    /// Percentage of logs carrying this tag, rounded to the nearest integer
    pub pct: u32,
}

/// An unordered symptom pair (alphabetically normalized) with co-occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPairCount {
    pub tag_a: String,
    pub tag_b: String,
    pub count: usize,
    pub pct: u32,
}

/// Recency trend for one symptom tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagTrend {
    pub tag: String,
    /// Recent-share minus older-share, in percentage points
    pub change_pct: f64,
    pub increasing: bool,
}

/// Retrospective insights mined from the symptom log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomInsights {
    /// Top symptoms across all logs
    pub most_common: Vec<TagCount>,
    /// Top symptoms per cycle phase; phases without logs map to empty lists
    pub by_phase: BTreeMap<Phase, Vec<TagCount>>,
    /// Most frequent same-day symptom pairs
    pub correlated_pairs: Vec<TagPairCount>,
    /// Tags whose recent share shifted notably versus older logs
    pub trends: Vec<TagTrend>,
}
