//! Weighted understanding score, radar profile and growth trend.
//!
//! Final score = 0.4 * concept clarity + 0.3 * application
//!             + 0.2 * logical consistency + 0.1 * depth

use serde::{Deserialize, Serialize};

const CONCEPT_CLARITY_WEIGHT: f64 = 0.4;
const APPLICATION_WEIGHT: f64 = 0.3;
const LOGICAL_CONSISTENCY_WEIGHT: f64 = 0.2;
const DEPTH_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreBreakdown {
    pub(crate) concept_clarity: f64,
    pub(crate) application: f64,
    pub(crate) logical_consistency: f64,
    pub(crate) depth: f64,
    pub(crate) final_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub(crate) struct RadarScores {
    pub(crate) clarity: f64,
    pub(crate) application: f64,
    pub(crate) logic: f64,
    pub(crate) critical_thinking: f64,
    pub(crate) retention: f64,
}

/// Rounds the exact decimal value of `value` to one place, ties to even.
/// NaN and infinities pass through.
pub(crate) fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Inputs are expected in `[0, 100]` but are neither validated nor clamped.
/// The weighted sum uses the unrounded inputs.
pub(crate) fn calculate_final_score(
    concept_clarity: f64,
    application: f64,
    logical_consistency: f64,
    depth: f64,
) -> ScoreBreakdown {
    let final_score = CONCEPT_CLARITY_WEIGHT * concept_clarity
        + APPLICATION_WEIGHT * application
        + LOGICAL_CONSISTENCY_WEIGHT * logical_consistency
        + DEPTH_WEIGHT * depth;

    ScoreBreakdown {
        concept_clarity: round1(concept_clarity),
        application: round1(application),
        logical_consistency: round1(logical_consistency),
        depth: round1(depth),
        final_score: round1(final_score),
    }
}

pub(crate) fn build_radar_scores(
    clarity: f64,
    application: f64,
    logic: f64,
    critical_thinking: f64,
    retention: f64,
) -> RadarScores {
    RadarScores {
        clarity: round1(clarity),
        application: round1(application),
        logic: round1(logic),
        critical_thinking: round1(critical_thinking),
        retention: round1(retention),
    }
}

/// Percentage change from the mean of the first half of `history` to the mean
/// of the second half (oldest first). With an odd length the second half gets
/// the extra element.
///
/// Returns 0.0 for fewer than two points, and also whenever the first-half
/// mean is exactly zero, even if the second half is not.
pub(crate) fn compute_growth_trend(history: &[f64]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }

    let mid = history.len() / 2;
    let (first, second) = history.split_at(mid);
    let first_mean = mean(first);
    let second_mean = mean(second);

    if first_mean == 0.0 {
        return 0.0;
    }

    round1((second_mean - first_mean) / first_mean * 100.0)
}

/// Arithmetic mean; 0.0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_score_uses_fixed_weights() {
        let scores = calculate_final_score(80.0, 70.0, 90.0, 60.0);
        // 32 + 21 + 18 + 6
        assert_eq!(scores.final_score, 77.0);
    }

    #[test]
    fn final_score_rounds_every_field() {
        let scores = calculate_final_score(81.26, 70.04, 90.56, 61.91);
        assert_eq!(scores.concept_clarity, 81.3);
        assert_eq!(scores.application, 70.0);
        assert_eq!(scores.logical_consistency, 90.6);
        assert_eq!(scores.depth, 61.9);
        // 32.504 + 21.012 + 18.112 + 6.191 = 77.819
        assert_eq!(scores.final_score, 77.8);
    }

    #[test]
    fn final_score_stays_within_bounds_on_grid() {
        let steps = [0.0, 12.34, 50.0, 66.66, 99.95, 100.0];
        for c in steps {
            for a in steps {
                for l in steps {
                    for d in steps {
                        let scores = calculate_final_score(c, a, l, d);
                        let expected = round1(0.4 * c + 0.3 * a + 0.2 * l + 0.1 * d);
                        assert_eq!(scores.final_score, expected);
                        assert!((0.0..=100.0).contains(&scores.final_score));
                    }
                }
            }
        }
    }

    #[test]
    fn rounding_follows_the_exact_binary_value() {
        // 0.15 is stored as 0.1499999...
        assert_eq!(round1(0.15), 0.1);
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(-0.25), -0.2);
        assert_eq!(round1(2.675), 2.7);
    }

    #[test]
    fn weighted_half_tenth_rounds_to_even() {
        // 32 + 21 + 18 + 6.25 = 77.25
        let scores = calculate_final_score(80.0, 70.0, 90.0, 62.5);
        assert_eq!(scores.depth, 62.5);
        assert_eq!(scores.final_score, 77.2);
    }

    #[test]
    fn out_of_range_inputs_pass_through() {
        let scores = calculate_final_score(150.0, -10.0, 0.0, 0.0);
        assert_eq!(scores.concept_clarity, 150.0);
        assert_eq!(scores.application, -10.0);
        assert_eq!(scores.final_score, 57.0);

        let nan = calculate_final_score(f64::NAN, 50.0, 50.0, 50.0);
        assert!(nan.final_score.is_nan());
    }

    #[test]
    fn radar_rounds_each_dimension_independently() {
        let radar = build_radar_scores(70.04, 75.06, 80.149, 0.0, 99.99);
        assert_eq!(
            radar,
            RadarScores {
                clarity: 70.0,
                application: 75.1,
                logic: 80.1,
                critical_thinking: 0.0,
                retention: 100.0,
            }
        );
    }

    #[test]
    fn growth_trend_needs_two_points() {
        assert_eq!(compute_growth_trend(&[]), 0.0);
        assert_eq!(compute_growth_trend(&[42.0]), 0.0);
    }

    #[test]
    fn growth_trend_zero_first_half_short_circuits() {
        assert_eq!(compute_growth_trend(&[0.0, 50.0]), 0.0);
        assert_eq!(compute_growth_trend(&[0.0, 0.0, 90.0, 90.0]), 0.0);
    }

    #[test]
    fn growth_trend_signs() {
        assert_eq!(compute_growth_trend(&[50.0, 100.0]), 100.0);
        assert_eq!(compute_growth_trend(&[100.0, 50.0]), -50.0);
    }

    #[test]
    fn growth_trend_compares_half_means() {
        // (85 - 65) / 65 * 100 = 30.769...
        assert_eq!(compute_growth_trend(&[60.0, 70.0, 80.0, 90.0]), 30.8);
    }

    #[test]
    fn growth_trend_odd_length_gives_second_half_the_extra_point() {
        // first = [60], second = [70, 80] -> (75 - 60) / 60 * 100
        assert_eq!(compute_growth_trend(&[60.0, 70.0, 80.0]), 25.0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
