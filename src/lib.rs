//! Cyclesense - On-device cycle prediction and phase analytics engine
//!
//! Cyclesense turns a sparse history of observed period intervals and dated
//! symptom logs into structured results through a deterministic set of pure
//! operations: statistics reduction → next-cycle prediction → phase
//! classification → symptom insight mining.
//!
//! ## Modules
//!
//! - **stats**: aggregate cycle metrics and regularity rating
//! - **predictor**: next period, ovulation date, and fertile window
//! - **phase**: phase assignment for arbitrary calendar dates
//! - **insights**: symptom frequency, phase correlation, co-occurrence, trends
//!
//! The engine holds no state and performs no I/O; every operation is a pure
//! function of the caller-supplied history snapshot.

pub mod engine;
pub mod error;
pub mod history;
pub mod insights;
pub mod phase;
pub mod predictor;
pub mod stats;
pub mod types;

pub use engine::CycleEngine;
pub use error::EngineError;
pub use insights::{analyze_symptoms, predict_symptoms_for_day};
pub use phase::classify_phase;
pub use predictor::predict;
pub use stats::{compute_statistics, regularity_rating};
pub use types::{
    CycleInterval, CycleStats, FertileWindow, Phase, PhaseAssignment, Prediction,
    PredictionReport, RegularityRating, SymptomInsights, SymptomLog, TagCount, TagPairCount,
    TagTrend,
};

/// Engine version embedded in CLI output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for CLI output
pub const PRODUCER_NAME: &str = "cyclesense";
