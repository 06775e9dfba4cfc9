//! Indicator catalog and matcher.
//!
//! The catalog is the static, versioned table of risk indicators the whole
//! engine keys off: each entry pairs a case-insensitive pattern with an
//! evidence weight, a category, and an immediate-action flag. Loaded once at
//! startup, never mutated by scoring.
//!
//! The built-in set is derived from C-SSRS-style screening language. Exact
//! trigger phrasing is configuration; weights and immediate flags are the
//! behavioral contract.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use super::types::{IndicatorCategory, IndicatorMatch, TriageError};

/// A compiled risk indicator with its scoring metadata.
#[derive(Debug, Clone)]
pub struct RiskIndicator {
    regex: Regex,
    pub weight: f32,
    pub category: IndicatorCategory,
    pub immediate_action: bool,
    pub clinical_note: String,
}

/// The built-in indicator set — 16 indicators across 12 categories.
static BUILTIN_INDICATORS: LazyLock<Vec<RiskIndicator>> = LazyLock::new(|| {
    use IndicatorCategory::*;
    vec![
        indicator(
            r"(?i)\b(kill\s+myself|end\s+my\s+life|commit\s+suicide|take\s+my\s+(own\s+)?life)\b",
            1.0,
            ActiveIdeation,
            true,
            "Active suicidal ideation with intent",
        ),
        indicator(
            r"(?i)\b(want\s+to\s+die|wish\s+i\s+was\s+dead|better\s+off\s+dead|don't\s+want\s+to\s+live)\b",
            0.9,
            ActiveIdeation,
            true,
            "Active suicidal ideation without specific intent",
        ),
        indicator(
            r"(?i)\b(planning\s+to|going\s+to|will)\s+(kill|end|harm)\s+(myself|my\s+life)\b",
            1.0,
            ActivePlan,
            true,
            "Suicide plan in progress",
        ),
        indicator(
            r"(?i)\b(wish\s+i\s+could\s+disappear|wouldn't\s+mind\s+dying|hope\s+i\s+don't\s+wake\s+up)\b",
            0.7,
            PassiveIdeation,
            false,
            "Passive suicidal ideation",
        ),
        indicator(
            r"(?i)\b(no\s+point\s+in\s+living|life\s+is(n't)?\s+worth|what's\s+the\s+point)\b",
            0.6,
            PassiveIdeation,
            false,
            "Existential despair",
        ),
        indicator(
            r"(?i)\b(cut(ting)?\s+myself|burn(ing)?\s+myself|hurt(ing)?\s+myself)\b",
            0.8,
            SelfHarm,
            true,
            "Active self-harm behavior",
        ),
        indicator(
            r"(?i)\b(self[\s-]?harm|self[\s-]?injur(y|e))\b",
            0.7,
            SelfHarm,
            false,
            "Self-harm ideation",
        ),
        indicator(
            r"(?i)\b(have\s+)?(gun|weapon|pills|rope|knife)\s+(to|for|ready)\b",
            1.0,
            MethodAccess,
            true,
            "Access to lethal means",
        ),
        indicator(
            r"(?i)\b(overdose|hanging|jumping|drowning)\b",
            0.9,
            MethodAccess,
            true,
            "Specific method mentioned",
        ),
        indicator(
            r"(?i)\b(no\s+one\s+cares|nobody\s+would\s+miss|alone\s+in\s+this|no\s+family|no\s+friends)\b",
            0.6,
            Isolation,
            false,
            "Lack of social support",
        ),
        indicator(
            r"(?i)\b(lost\s+everything|nothing\s+left|no\s+hope|hopeless)\b",
            0.7,
            Hopelessness,
            false,
            "Severe hopelessness",
        ),
        indicator(
            r"(?i)\b(tonight|today|right\s+now|immediately|soon|by\s+tomorrow)\b.*\b(die|end|kill)\b",
            1.0,
            TemporalUrgency,
            true,
            "Immediate temporal intent",
        ),
        indicator(
            r"(?i)\b(can't\s+take\s+it\s+anymore|at\s+my\s+limit|breaking\s+point)\b",
            0.8,
            AcuteDistress,
            true,
            "Acute distress",
        ),
        indicator(
            r"(?i)\b(tried\s+before|attempted\s+suicide|previous\s+attempt|last\s+time\s+i\s+tried)\b",
            0.9,
            PriorAttempt,
            true,
            "Previous suicide attempt",
        ),
        indicator(
            r"(?i)\b(voices\s+tell(ing)?\s+me|hearing\s+voices|they're\s+coming\s+for\s+me)\b",
            0.8,
            PsychosisSignal,
            true,
            "Possible psychotic symptoms",
        ),
        indicator(
            r"(?i)\b(drunk|wasted|overdosed|using\s+drugs|drinking\s+heavily)\b",
            0.6,
            SubstanceUse,
            false,
            "Substance use increasing risk",
        ),
    ]
});

fn indicator(
    regex_str: &str,
    weight: f32,
    category: IndicatorCategory,
    immediate_action: bool,
    clinical_note: &str,
) -> RiskIndicator {
    RiskIndicator {
        regex: Regex::new(regex_str).expect("Invalid built-in indicator pattern"),
        weight,
        category,
        immediate_action,
        clinical_note: clinical_note.to_string(),
    }
}

/// One entry of an externally-supplied catalog, before compilation.
#[derive(Debug, Deserialize)]
struct IndicatorSpec {
    pattern: String,
    weight: f32,
    category: IndicatorCategory,
    #[serde(default)]
    immediate_action: bool,
    #[serde(default)]
    clinical_note: String,
}

/// The immutable indicator catalog. Construct once at startup, share by
/// reference into every assessment.
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    indicators: Vec<RiskIndicator>,
}

impl IndicatorCatalog {
    /// The built-in indicator set.
    pub fn builtin() -> Self {
        Self {
            indicators: BUILTIN_INDICATORS.clone(),
        }
    }

    /// Load a catalog from a JSON array of indicator entries.
    ///
    /// This is the one fail-fast path of the engine: a malformed entry or an
    /// uncompilable pattern rejects the whole catalog at startup rather than
    /// degrading per-request. Patterns are compiled case-insensitive
    /// regardless of inline flags.
    pub fn from_json_str(json: &str) -> Result<Self, TriageError> {
        let specs: Vec<IndicatorSpec> =
            serde_json::from_str(json).map_err(|e| TriageError::CatalogLoad(e.to_string()))?;

        if specs.is_empty() {
            return Err(TriageError::CatalogLoad("catalog has no indicators".into()));
        }

        let mut indicators = Vec::with_capacity(specs.len());
        for spec in specs {
            if !(0.0..=1.0).contains(&spec.weight) {
                return Err(TriageError::CatalogLoad(format!(
                    "indicator weight {} out of range [0, 1]",
                    spec.weight
                )));
            }
            let regex = RegexBuilder::new(&spec.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| TriageError::PatternCompile {
                    pattern: spec.pattern.clone(),
                    reason: e.to_string(),
                })?;
            indicators.push(RiskIndicator {
                regex,
                weight: spec.weight,
                category: spec.category,
                immediate_action: spec.immediate_action,
                clinical_note: spec.clinical_note,
            });
        }

        Ok(Self { indicators })
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Find which indicators occur in `text`.
    ///
    /// Each indicator contributes at most one match (search, not count).
    /// Total over any input, including empty and non-linguistic text, and
    /// never mutates the catalog.
    pub fn matches(&self, text: &str) -> Vec<IndicatorMatch> {
        self.indicators
            .iter()
            .filter(|ind| ind.regex.is_match(text))
            .map(|ind| IndicatorMatch {
                category: ind.category,
                weight: ind.weight,
                immediate_action: ind.immediate_action,
                clinical_note: ind.clinical_note.clone(),
            })
            .collect()
    }
}

impl Default for IndicatorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> IndicatorCatalog {
        IndicatorCatalog::builtin()
    }

    // ── Built-in catalog shape ─────────────────────────────────

    #[test]
    fn builtin_catalog_loads() {
        assert_eq!(catalog().len(), 16);
    }

    #[test]
    fn builtin_weights_in_range() {
        for ind in BUILTIN_INDICATORS.iter() {
            assert!((0.0..=1.0).contains(&ind.weight), "weight {}", ind.weight);
        }
    }

    // ── Matching per category ──────────────────────────────────

    #[test]
    fn matches_active_ideation_with_intent() {
        let found = catalog().matches("I am going to kill myself");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::ActiveIdeation && m.immediate_action));
    }

    #[test]
    fn matches_passive_ideation() {
        let found = catalog().matches("sometimes I wish I could disappear");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, IndicatorCategory::PassiveIdeation);
        assert!(!found[0].immediate_action);
        assert!((found[0].weight - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn matches_method_access() {
        let found = catalog().matches("I have pills ready");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::MethodAccess));
    }

    #[test]
    fn matches_temporal_urgency_requires_harm_language() {
        // "tonight" alone is harmless; it needs harm language after it.
        let plain = catalog().matches("see you tonight at the game");
        assert!(plain.is_empty());

        let urgent = catalog().matches("tonight it all has to end");
        assert!(urgent
            .iter()
            .any(|m| m.category == IndicatorCategory::TemporalUrgency));
    }

    #[test]
    fn matches_prior_attempt() {
        let found = catalog().matches("I tried before, last year");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::PriorAttempt));
    }

    #[test]
    fn matches_psychosis_signal() {
        let found = catalog().matches("the voices telling me to do it");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::PsychosisSignal));
    }

    #[test]
    fn matches_substance_use() {
        let found = catalog().matches("I've been drinking heavily all week");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::SubstanceUse));
    }

    #[test]
    fn matches_isolation_and_hopelessness_together() {
        let found = catalog().matches("no one cares and there is nothing left");
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::Isolation));
        assert!(found
            .iter()
            .any(|m| m.category == IndicatorCategory::Hopelessness));
    }

    // ── Matching contract ──────────────────────────────────────

    #[test]
    fn matching_is_case_insensitive() {
        assert!(!catalog().matches("I WANT TO DIE").is_empty());
        assert!(!catalog().matches("i Want To Die").is_empty());
    }

    #[test]
    fn one_match_per_indicator_even_with_repeats() {
        let found = catalog().matches("I want to die. I want to die. I want to die.");
        let ideation = found
            .iter()
            .filter(|m| m.category == IndicatorCategory::ActiveIdeation)
            .count();
        assert_eq!(ideation, 1);
    }

    #[test]
    fn empty_input_matches_nothing() {
        assert!(catalog().matches("").is_empty());
    }

    #[test]
    fn non_linguistic_input_is_handled() {
        let noise = "\u{0}\u{1}\u{7f}\u{fffd} 🤖🤖 0xDEADBEEF \t\r\n";
        assert!(catalog().matches(noise).is_empty());
    }

    #[test]
    fn neutral_messages_match_nothing() {
        for text in [
            "what time is the meeting tomorrow?",
            "thanks, that recipe worked great",
            "my internet keeps dropping",
        ] {
            assert!(catalog().matches(text).is_empty(), "false positive: {text}");
        }
    }

    #[test]
    fn matching_is_repeatable() {
        let cat = catalog();
        let text = "I can't take it anymore, I want to die";
        assert_eq!(cat.matches(text), cat.matches(text));
    }

    // ── External catalogs ──────────────────────────────────────

    #[test]
    fn external_catalog_loads_and_matches() {
        let json = r#"[
            {
                "pattern": "\\bgiving\\s+away\\s+my\\s+things\\b",
                "weight": 0.8,
                "category": "active_ideation",
                "immediate_action": true,
                "clinical_note": "Possessions given away"
            }
        ]"#;
        let cat = IndicatorCatalog::from_json_str(json).unwrap();
        assert_eq!(cat.len(), 1);
        // case-insensitive regardless of inline flags
        let found = cat.matches("I am GIVING AWAY my things today");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].clinical_note, "Possessions given away");
    }

    #[test]
    fn external_catalog_rejects_bad_regex() {
        let json = r#"[{"pattern": "([unclosed", "weight": 0.5, "category": "self_harm"}]"#;
        let err = IndicatorCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, TriageError::PatternCompile { .. }));
    }

    #[test]
    fn external_catalog_rejects_out_of_range_weight() {
        let json = r#"[{"pattern": "x", "weight": 1.5, "category": "self_harm"}]"#;
        let err = IndicatorCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, TriageError::CatalogLoad(_)));
    }

    #[test]
    fn external_catalog_rejects_empty_list() {
        let err = IndicatorCatalog::from_json_str("[]").unwrap_err();
        assert!(matches!(err, TriageError::CatalogLoad(_)));
    }

    #[test]
    fn external_catalog_rejects_malformed_json() {
        let err = IndicatorCatalog::from_json_str("not json").unwrap_err();
        assert!(matches!(err, TriageError::CatalogLoad(_)));
    }
}
