//! Score combination, severity classification, and confidence.
//!
//! Because the base channel is weighted 0.5 and capped at 4.0, indicator
//! matching alone tops out at a combined 2.0 and can never classify above
//! `Moderate`; reaching `High` or `Crisis` requires convergent evidence
//! from the context, temporal, and linguistic channels.

use crate::config::{ChannelWeights, ClassificationThresholds};

use super::types::{ChannelScores, IndicatorMatch, RiskLevel};

/// Confidence assigned when no indicator matched at all.
const NO_INDICATOR_CONFIDENCE: f32 = 0.3;
/// Confidence added per matched indicator.
const PER_MATCH_CONFIDENCE: f32 = 0.2;
/// Ceiling on match-count confidence.
const MATCH_CONFIDENCE_CAP: f32 = 0.8;
/// Floor applied when any immediate-flagged indicator matched.
const IMMEDIATE_CONFIDENCE_FLOOR: f32 = 0.9;

/// Weighted combination of the four channel scores.
pub fn combine_scores(scores: &ChannelScores, weights: &ChannelWeights) -> f32 {
    scores.base * weights.base
        + scores.context * weights.context
        + scores.temporal * weights.temporal
        + scores.linguistic * weights.linguistic
}

/// Map a combined score onto the severity scale, highest threshold first.
pub fn classify(combined: f32, thresholds: &ClassificationThresholds) -> RiskLevel {
    if combined >= thresholds.crisis {
        RiskLevel::Crisis
    } else if combined >= thresholds.high {
        RiskLevel::High
    } else if combined >= thresholds.moderate {
        RiskLevel::Moderate
    } else if combined >= thresholds.low {
        RiskLevel::Low
    } else {
        RiskLevel::None
    }
}

/// Confidence in the classification, always within [0, 1].
///
/// Grows with the number of matched indicators; an immediate-flagged match
/// raises it to at least 0.9 even when it is the only evidence.
pub fn confidence(matches: &[IndicatorMatch]) -> f32 {
    if matches.is_empty() {
        return NO_INDICATOR_CONFIDENCE;
    }

    let mut conf = (matches.len() as f32 * PER_MATCH_CONFIDENCE).min(MATCH_CONFIDENCE_CAP);

    if matches.iter().any(|m| m.immediate_action) {
        conf = conf.max(IMMEDIATE_CONFIDENCE_FLOOR);
    }

    conf
}
