//! Turns raw analyzer dimensions into persisted scores and radar values.

use thiserror::Error;

use crate::services::evaluator::Dimensions;
use crate::services::scoring::{build_radar_scores, calculate_final_score, RadarScores, ScoreBreakdown};

const DEFAULT_DEPTH: f64 = 70.0;
const DEFAULT_CLARITY: f64 = 75.0;
const DEFAULT_CRITICAL_THINKING: f64 = 70.0;
const DEFAULT_RETENTION: f64 = 72.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum EvaluationError {
    #[error("analyzer output is missing the `{0}` dimension")]
    MissingDimension(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Evaluation {
    pub(crate) scores: ScoreBreakdown,
    pub(crate) radar: RadarScores,
}

fn required(dimensions: &Dimensions, name: &'static str) -> Result<f64, EvaluationError> {
    dimensions
        .get(name)
        .copied()
        .ok_or(EvaluationError::MissingDimension(name))
}

fn optional(dimensions: &Dimensions, name: &str, default: f64) -> f64 {
    dimensions.get(name).copied().unwrap_or(default)
}

/// Concept clarity, application and logical consistency are required; the
/// remaining dimensions fall back to fixed defaults. The radar reuses
/// application and logical consistency as its application and logic axes.
pub(crate) fn score_dimensions(dimensions: &Dimensions) -> Result<Evaluation, EvaluationError> {
    let concept_clarity = required(dimensions, "concept_clarity")?;
    let application = required(dimensions, "application")?;
    let logical_consistency = required(dimensions, "logical_consistency")?;

    let scores = calculate_final_score(
        concept_clarity,
        application,
        logical_consistency,
        optional(dimensions, "depth", DEFAULT_DEPTH),
    );
    let radar = build_radar_scores(
        optional(dimensions, "clarity", DEFAULT_CLARITY),
        application,
        logical_consistency,
        optional(dimensions, "critical_thinking", DEFAULT_CRITICAL_THINKING),
        optional(dimensions, "retention", DEFAULT_RETENTION),
    );

    Ok(Evaluation { scores, radar })
}
