use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Severity classification for a single assessed message.
///
/// The ordinal ordering (`None < Low < Moderate < High < Crisis`) drives all
/// gating: immediate action and escalation at `High` and above, safety
/// planning at `Moderate` and above.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum RiskLevel {
    /// No concern detected in this message.
    #[default]
    None,
    /// Mild signals, monitor.
    Low,
    /// Moderate signals, supportive intervention recommended.
    Moderate,
    /// Severe signals, immediate intervention needed.
    High,
    /// Imminent danger, emergency response required.
    Crisis,
}

impl RiskLevel {
    /// Integer rank used for threshold comparisons and history entries.
    pub fn severity(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::Crisis => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Crisis => "crisis",
        }
    }
}

// ---------------------------------------------------------------------------
// Indicator categories
// ---------------------------------------------------------------------------

/// Risk category of a catalog indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    /// Active suicidal ideation (stated wish or intent).
    ActiveIdeation,
    /// Suicide plan in progress.
    ActivePlan,
    /// Passive ideation (wishing to disappear, not wake up).
    PassiveIdeation,
    /// Current or past self-injury.
    SelfHarm,
    /// Access to lethal means.
    MethodAccess,
    /// Lack of social support.
    Isolation,
    /// Severe hopelessness.
    Hopelessness,
    /// Immediate temporal intent ("tonight", "right now").
    TemporalUrgency,
    /// Acute distress at a breaking point.
    AcuteDistress,
    /// Reference to a previous attempt.
    PriorAttempt,
    /// Possible psychotic symptoms (command hallucinations, persecution).
    PsychosisSignal,
    /// Acute substance use alongside distress.
    SubstanceUse,
}

impl IndicatorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveIdeation => "active_ideation",
            Self::ActivePlan => "active_plan",
            Self::PassiveIdeation => "passive_ideation",
            Self::SelfHarm => "self_harm",
            Self::MethodAccess => "method_access",
            Self::Isolation => "isolation",
            Self::Hopelessness => "hopelessness",
            Self::TemporalUrgency => "temporal_urgency",
            Self::AcuteDistress => "acute_distress",
            Self::PriorAttempt => "prior_attempt",
            Self::PsychosisSignal => "psychosis_signal",
            Self::SubstanceUse => "substance_use",
        }
    }
}

// ---------------------------------------------------------------------------
// Matches and channel scores
// ---------------------------------------------------------------------------

/// A catalog indicator that matched the current message.
///
/// Produced fresh per assessment; carries the indicator metadata needed by
/// the scorers and the protocol selector, never the message text itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorMatch {
    pub category: IndicatorCategory,
    /// Evidence weight of the indicator (0.0–1.0).
    pub weight: f32,
    /// Whether this indicator alone warrants immediate attention.
    pub immediate_action: bool,
    /// Human-readable rationale for the audit trail.
    pub clinical_note: String,
}

/// The four independent channel scores feeding the combiner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ChannelScores {
    pub base: f32,
    pub context: f32,
    pub temporal: f32,
    pub linguistic: f32,
}

// ---------------------------------------------------------------------------
// Session history
// ---------------------------------------------------------------------------

/// Per-session summary of one past assessment.
///
/// Deliberately holds no message text — only enough for temporal trend
/// detection (severity, indicator count, when).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionHistoryEntry {
    pub timestamp: NaiveDateTime,
    pub risk_level: RiskLevel,
    /// Ordinal rank of `risk_level` (0..=4).
    pub severity: u8,
    /// How many catalog indicators matched the assessed message.
    pub indicator_count: usize,
}

// ---------------------------------------------------------------------------
// Protocol outputs
// ---------------------------------------------------------------------------

/// Urgency class of an escalation path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EscalationUrgency {
    /// Crisis: initiate emergency response now.
    Immediate,
    /// High: warm handoff to a crisis counselor.
    Urgent,
}

/// Kind of contact the caller should involve.
///
/// The engine returns contact *kinds* only; the chat layer resolves them to
/// locale-appropriate numbers and services.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    EmergencyServices,
    CrisisTeam,
    CrisisHotline,
    MentalHealthProfessional,
}

/// What class of escalated response is required, independent of how the
/// caller executes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationPath {
    pub urgency: EscalationUrgency,
    pub contact_kinds: Vec<ContactKind>,
    /// Protocol instruction for the responding human or system.
    pub protocol: String,
    /// What must be documented about the interaction.
    pub documentation: String,
}

/// Templated, severity-gated safety plan returned for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyPlan {
    pub warning_signs: Vec<String>,
    pub coping_strategies: Vec<String>,
    /// Kinds of support contacts to list, not live contact details.
    pub support_contacts: Vec<String>,
    pub safe_environment: Vec<String>,
    pub reasons_for_living: Vec<String>,
}

// ---------------------------------------------------------------------------
// RiskAssessment
// ---------------------------------------------------------------------------

/// The complete result of assessing one message. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: Uuid,
    pub assessed_at: NaiveDateTime,
    pub risk_level: RiskLevel,
    /// Confidence in the classification, always within [0, 1].
    pub confidence: f32,
    pub matched_indicators: Vec<IndicatorMatch>,
    /// The raw per-channel scores that produced `combined_score`.
    pub channel_scores: ChannelScores,
    pub combined_score: f32,
    /// True exactly when `risk_level >= High`.
    pub immediate_action_required: bool,
    pub recommended_interventions: Vec<String>,
    /// Present exactly when `risk_level >= High`.
    pub escalation_path: Option<EscalationPath>,
    /// Present exactly when `risk_level >= Moderate`.
    pub safety_plan: Option<SafetyPlan>,
    /// Rationale strings of the matched indicators, for the audit trail.
    pub clinical_notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Optional per-message metadata supplied by the chat layer.
///
/// All fields are best-effort: anything absent or malformed is skipped, it
/// never fails an assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Client-local send time, RFC 3339 or naive ISO 8601.
    pub timestamp: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Triage engine errors.
///
/// Assessment itself is total and never returns these; they can only arise
/// when loading an external catalog at startup or from a poisoned store
/// lock, which the orchestrator degrades around.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Indicator catalog failed to load: {0}")]
    CatalogLoad(String),

    #[error("Indicator pattern failed to compile: {pattern}: {reason}")]
    PatternCompile { pattern: String, reason: String },

    #[error("Session history lock poisoned")]
    LockFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_total_order() {
        assert!(RiskLevel::None < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Crisis);
    }

    #[test]
    fn risk_level_severity_ordinals() {
        assert_eq!(RiskLevel::None.severity(), 0);
        assert_eq!(RiskLevel::Low.severity(), 1);
        assert_eq!(RiskLevel::Moderate.severity(), 2);
        assert_eq!(RiskLevel::High.severity(), 3);
        assert_eq!(RiskLevel::Crisis.severity(), 4);
    }

    #[test]
    fn risk_level_default_is_none() {
        assert_eq!(RiskLevel::default(), RiskLevel::None);
    }

    #[test]
    fn risk_level_as_str() {
        assert_eq!(RiskLevel::Crisis.as_str(), "crisis");
        assert_eq!(RiskLevel::None.as_str(), "none");
    }

    #[test]
    fn category_as_str_stable() {
        assert_eq!(IndicatorCategory::ActiveIdeation.as_str(), "active_ideation");
        assert_eq!(IndicatorCategory::SubstanceUse.as_str(), "substance_use");
        assert_eq!(IndicatorCategory::PsychosisSignal.as_str(), "psychosis_signal");
    }

    #[test]
    fn category_serde_snake_case() {
        let json = serde_json::to_string(&IndicatorCategory::MethodAccess).unwrap();
        assert_eq!(json, "\"method_access\"");
        let back: IndicatorCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IndicatorCategory::MethodAccess);
    }

    #[test]
    fn metadata_defaults_to_empty() {
        let meta = MessageMetadata::default();
        assert!(meta.timestamp.is_none());
    }

    #[test]
    fn escalation_path_serializes() {
        let path = EscalationPath {
            urgency: EscalationUrgency::Immediate,
            contact_kinds: vec![ContactKind::EmergencyServices, ContactKind::CrisisTeam],
            protocol: "Initiate emergency response protocol".into(),
            documentation: "Document all interactions and interventions".into(),
        };
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.contains("emergency_services"));
        assert!(json.contains("Immediate"));
    }
}
