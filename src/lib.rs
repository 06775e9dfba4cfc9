//! Anchora — conversational safety-triage engine.
//!
//! Given one inbound chat message (plus optional conversation history and
//! per-session assessment history), the engine produces a structured
//! [`RiskAssessment`]: a severity classification, a confidence score, the
//! matched evidence, and the recommended response protocol. The chat layer
//! uses it to route replies and decide when to surface support resources.
//!
//! The engine is deliberately small and auditable: a fixed scoring function
//! over a versioned indicator catalog, not a learned model. It performs no
//! I/O, holds no external resources, and never errors on any input.

pub mod config;
pub mod triage;

pub use config::ScoringConfig;
pub use triage::catalog::IndicatorCatalog;
pub use triage::engine::TriageEngine;
pub use triage::types::{
    MessageMetadata, RiskAssessment, RiskLevel, SessionHistoryEntry, TriageError,
};
