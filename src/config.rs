use serde::{Deserialize, Serialize};

/// Hard cap on entries retained per session (oldest evicted first).
pub const SESSION_HISTORY_CAP: usize = 100;

/// Tunable scoring constants for the triage engine.
///
/// The default weights and thresholds are heuristic, not derived from a
/// cited clinical validation study; treat them as product configuration
/// pending clinical review, not as validated defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub weights: ChannelWeights,
    pub thresholds: ClassificationThresholds,
    /// Ceiling applied to the base indicator score.
    pub base_score_cap: f32,
    /// Per-immediate-indicator amplification applied when more than one
    /// immediate-flagged indicator matches.
    pub immediate_amplifier: f32,
}

/// Relative weight of each scoring channel in the combined score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChannelWeights {
    pub base: f32,
    pub context: f32,
    pub temporal: f32,
    pub linguistic: f32,
}

/// Combined-score thresholds, checked highest first with `>=`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassificationThresholds {
    pub low: f32,
    pub moderate: f32,
    pub high: f32,
    pub crisis: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ChannelWeights {
                base: 0.5,
                context: 0.2,
                temporal: 0.15,
                linguistic: 0.15,
            },
            thresholds: ClassificationThresholds {
                low: 0.5,
                moderate: 1.5,
                high: 2.5,
                crisis: 3.5,
            },
            base_score_cap: 4.0,
            immediate_amplifier: 0.2,
        }
    }
}
