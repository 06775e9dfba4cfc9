//! The four independent scoring channels.
//!
//! Every scorer is a total function over its typed inputs: no I/O, no
//! shared mutable state, no panics on any text. The base channel carries
//! the catalog evidence; context, temporal, and linguistic provide the
//! corroboration needed to classify above `Moderate`.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Timelike};
use regex::Regex;

use crate::config::ScoringConfig;

use super::catalog::IndicatorCatalog;
use super::types::{IndicatorMatch, MessageMetadata, SessionHistoryEntry};

// ── Context channel constants ───────────────────────────────

/// Fewer than this many words reads as a possible withdrawal signal.
const SHORT_MESSAGE_WORDS: usize = 5;
const SHORT_MESSAGE_BONUS: f32 = 0.1;
const FAREWELL_BONUS: f32 = 0.5;
const LATE_NIGHT_BONUS: f32 = 0.2;
const ESCALATION_TREND_BONUS: f32 = 0.3;

/// Late-night window: before 04:00 or after 22:00, client-local.
const LATE_NIGHT_BEFORE_HOUR: u32 = 4;
const LATE_NIGHT_AFTER_HOUR: u32 = 22;

// ── Temporal channel constants ──────────────────────────────

const RAPID_ESCALATION_FACTOR: f32 = 1.5;
const RAPID_ESCALATION_BONUS: f32 = 0.3;
const SUSTAINED_RISK_SEVERITY: f32 = 2.5;
const SUSTAINED_RISK_WINDOW: usize = 10;
const SUSTAINED_RISK_COUNT: usize = 5;
const SUSTAINED_RISK_BONUS: f32 = 0.2;

// ── Linguistic channel constants ────────────────────────────

const ABSOLUTIST_TERM_BONUS: f32 = 0.05;
const FIRST_PERSON_THRESHOLD: usize = 10;
const FIRST_PERSON_BONUS: f32 = 0.1;
const NEGATIVE_AFFECT_BONUS: f32 = 0.08;
const DISTORTION_BONUS: f32 = 0.05;

static ABSOLUTIST_TERMS: &[&str] =
    &["always", "never", "nothing", "everything", "completely", "totally"];

static NEGATIVE_AFFECT_TERMS: &[&str] =
    &["hate", "pain", "hurt", "suffer", "agony", "misery", "torment"];

static FAREWELL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\b(goodbye|farewell|final\s+message|last\s+words|want\s+you\s+to\s+know)\b"),
        compile(r"(?i)\b(thank\s+you\s+for\s+everything|sorry\s+for\s+everything|forgive\s+me)\b"),
    ]
});

static DISTORTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\b(all\s+or\s+nothing|black\s+and\s+white)\b"),
        compile(r"(?i)\b(should|must|have\s+to)\b"),
        compile(r"(?i)\b(catastroph|disaster|ruin|destroy)"),
    ]
});

static FIRST_PERSON: LazyLock<Regex> = LazyLock::new(|| compile(r"\bi\b"));

fn compile(regex_str: &str) -> Regex {
    Regex::new(regex_str).expect("Invalid scoring pattern")
}

// ── Base channel ────────────────────────────────────────────

/// Weighted sum of matched indicators, amplified when multiple
/// immediate-flagged indicators converge, capped at the top of the scale.
pub fn score_base(matches: &[IndicatorMatch], config: &ScoringConfig) -> f32 {
    if matches.is_empty() {
        return 0.0;
    }

    let mut total: f32 = matches.iter().map(|m| m.weight).sum();

    let immediate_count = matches.iter().filter(|m| m.immediate_action).count();
    if immediate_count > 1 {
        total *= 1.0 + config.immediate_amplifier * immediate_count as f32;
    }

    total.min(config.base_score_cap)
}

// ── Context channel ─────────────────────────────────────────

/// Contextual factors around the message: withdrawal-length replies,
/// farewell language, late-night send time, and an escalating trend across
/// the last few messages of the conversation.
pub fn score_context(
    message: &str,
    prior_messages: Option<&[String]>,
    metadata: Option<&MessageMetadata>,
    catalog: &IndicatorCatalog,
    config: &ScoringConfig,
) -> f32 {
    let mut score = 0.0;

    if message.split_whitespace().count() < SHORT_MESSAGE_WORDS {
        score += SHORT_MESSAGE_BONUS;
    }

    for pattern in FAREWELL_PATTERNS.iter() {
        if pattern.is_match(message) {
            score += FAREWELL_BONUS;
        }
    }

    // Malformed or missing timestamps contribute nothing, silently.
    if let Some(hour) = metadata
        .and_then(|m| m.timestamp.as_deref())
        .and_then(parse_timestamp)
        .map(|ts| ts.hour())
    {
        if hour < LATE_NIGHT_BEFORE_HOUR || hour > LATE_NIGHT_AFTER_HOUR {
            score += LATE_NIGHT_BONUS;
        }
    }

    if let Some(prior) = prior_messages {
        if base_scores_escalating(prior, message, catalog, config) {
            score += ESCALATION_TREND_BONUS;
        }
    }

    score
}

/// Parse a client-supplied timestamp leniently: RFC 3339 first, then naive
/// ISO 8601. The hour is taken in the client's own offset.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

/// True when the base score is strictly increasing over the current message
/// and up to two preceding messages.
fn base_scores_escalating(
    prior: &[String],
    message: &str,
    catalog: &IndicatorCatalog,
    config: &ScoringConfig,
) -> bool {
    if prior.is_empty() {
        return false;
    }

    let window_start = prior.len().saturating_sub(2);
    let scores: Vec<f32> = prior[window_start..]
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(message))
        .map(|text| score_base(&catalog.matches(text), config))
        .collect();

    scores.windows(2).all(|pair| pair[0] < pair[1])
}

// ── Temporal channel ────────────────────────────────────────

/// Session-level trend over recorded severities (most-recent-last):
/// rapid escalation between the last two assessments, else sustained
/// elevation across the recent window, else nothing.
pub fn score_temporal(history: &[SessionHistoryEntry]) -> f32 {
    if history.len() >= 2 {
        let last = history[history.len() - 1].severity as f32;
        let previous = history[history.len() - 2].severity as f32;
        if last > previous * RAPID_ESCALATION_FACTOR {
            return RAPID_ESCALATION_BONUS;
        }
    }

    let window_start = history.len().saturating_sub(SUSTAINED_RISK_WINDOW);
    let elevated = history[window_start..]
        .iter()
        .filter(|entry| entry.severity as f32 > SUSTAINED_RISK_SEVERITY)
        .count();
    if elevated > SUSTAINED_RISK_COUNT {
        return SUSTAINED_RISK_BONUS;
    }

    0.0
}

// ── Linguistic channel ──────────────────────────────────────

/// Language-level signals: absolutist vocabulary, self-focus, negative
/// affect, and cognitive-distortion phrasing.
pub fn score_linguistic(message: &str) -> f32 {
    let lower = message.to_lowercase();
    let mut score = 0.0;

    let absolutist = ABSOLUTIST_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    score += absolutist as f32 * ABSOLUTIST_TERM_BONUS;

    if FIRST_PERSON.find_iter(&lower).count() > FIRST_PERSON_THRESHOLD {
        score += FIRST_PERSON_BONUS;
    }

    let negative = NEGATIVE_AFFECT_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    score += negative as f32 * NEGATIVE_AFFECT_BONUS;

    for pattern in DISTORTION_PATTERNS.iter() {
        if pattern.is_match(message) {
            score += DISTORTION_BONUS;
        }
    }

    score
}
