//! Assessment orchestrator — the engine's single public entry point.
//!
//! `assess` sequences matcher → four scorers → combiner/classifier →
//! protocol selector, then records a summary in the session history store.
//! It is total: any input text, absent history, or malformed metadata still
//! produces a `RiskAssessment`. The only state it mutates is the history
//! ring for the given session id.

use chrono::Local;
use uuid::Uuid;

use crate::config::ScoringConfig;

use super::catalog::IndicatorCatalog;
use super::classify::{classify, combine_scores, confidence};
use super::history::SessionHistoryStore;
use super::protocol::{escalation_path, recommended_interventions, safety_plan};
use super::scoring::{score_base, score_context, score_linguistic, score_temporal};
use super::types::{
    ChannelScores, MessageMetadata, RiskAssessment, RiskLevel, SessionHistoryEntry,
};

/// The safety-triage engine. Construct once at startup and share.
pub struct TriageEngine {
    catalog: IndicatorCatalog,
    history: SessionHistoryStore,
    config: ScoringConfig,
}

impl TriageEngine {
    /// Engine with the built-in catalog and default scoring constants.
    pub fn new() -> Self {
        Self::with_catalog(IndicatorCatalog::builtin())
    }

    /// Engine with an externally-loaded catalog.
    pub fn with_catalog(catalog: IndicatorCatalog) -> Self {
        Self {
            catalog,
            history: SessionHistoryStore::new(),
            config: ScoringConfig::default(),
        }
    }

    /// Engine with explicit catalog and scoring constants.
    pub fn with_config(catalog: IndicatorCatalog, config: ScoringConfig) -> Self {
        Self {
            catalog,
            history: SessionHistoryStore::new(),
            config,
        }
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Snapshot of a session's recorded assessments, most-recent-last.
    /// Degrades to empty on a poisoned store lock.
    pub fn session_history(&self, session_id: &str) -> Vec<SessionHistoryEntry> {
        self.history.history_for(session_id).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Session history unavailable, reading as empty");
            Vec::new()
        })
    }

    /// Assess one inbound message.
    ///
    /// `history` is the conversation's recent prior message texts (supplied
    /// by the chat layer), `metadata` the optional per-message context. The
    /// temporal channel reads the session's recorded assessments from
    /// *before* this call; the new summary is recorded on the way out.
    pub fn assess(
        &self,
        message: &str,
        session_id: &str,
        history: Option<&[String]>,
        metadata: Option<&MessageMetadata>,
    ) -> RiskAssessment {
        let matches = self.catalog.matches(message);

        let session_history = self.session_history(session_id);

        let channel_scores = ChannelScores {
            base: score_base(&matches, &self.config),
            context: score_context(message, history, metadata, &self.catalog, &self.config),
            temporal: score_temporal(&session_history),
            linguistic: score_linguistic(message),
        };

        let combined_score = combine_scores(&channel_scores, &self.config.weights);
        let risk_level = classify(combined_score, &self.config.thresholds);
        let confidence = confidence(&matches);
        let immediate_action_required = risk_level >= RiskLevel::High;

        let recommended = recommended_interventions(risk_level, &matches);
        let clinical_notes = matches.iter().map(|m| m.clinical_note.clone()).collect();

        let assessment = RiskAssessment {
            id: Uuid::new_v4(),
            assessed_at: Local::now().naive_local(),
            risk_level,
            confidence,
            matched_indicators: matches,
            channel_scores,
            combined_score,
            immediate_action_required,
            recommended_interventions: recommended,
            escalation_path: escalation_path(risk_level),
            safety_plan: safety_plan(risk_level),
            clinical_notes,
        };

        self.record(session_id, &assessment);
        log_assessment(session_id, &assessment);

        assessment
    }

    fn record(&self, session_id: &str, assessment: &RiskAssessment) {
        let entry = SessionHistoryEntry {
            timestamp: assessment.assessed_at,
            risk_level: assessment.risk_level,
            severity: assessment.risk_level.severity(),
            indicator_count: assessment.matched_indicators.len(),
        };
        if let Err(e) = self.history.record(session_id, entry) {
            tracing::warn!(error = %e, "Failed to record assessment in session history");
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Log an assessment outcome WITHOUT the message text.
fn log_assessment(session_id: &str, assessment: &RiskAssessment) {
    if assessment.immediate_action_required {
        tracing::warn!(
            session_id,
            risk_level = assessment.risk_level.as_str(),
            combined_score = assessment.combined_score,
            confidence = assessment.confidence,
            indicator_count = assessment.matched_indicators.len(),
            "Assessment requires immediate action"
        );
    } else {
        tracing::info!(
            session_id,
            risk_level = assessment.risk_level.as_str(),
            combined_score = assessment.combined_score,
            confidence = assessment.confidence,
            indicator_count = assessment.matched_indicators.len(),
            "Assessment complete"
        );
    }
}
