//! Protocol selection: interventions, escalation path, safety plan.
//!
//! Everything here is gated purely by the severity ordinal and the matched
//! indicator categories. Outputs are deterministic templates; no randomness,
//! and no live contact details — the chat layer resolves contact *kinds* to
//! locale-appropriate services.

use super::types::{
    ContactKind, EscalationPath, EscalationUrgency, IndicatorCategory, IndicatorMatch, RiskLevel,
    SafetyPlan,
};

/// Ordered intervention recommendations for this assessment.
///
/// Universal items always come first, then the severity-gated blocks, then
/// category-specific extras.
pub fn recommended_interventions(level: RiskLevel, matches: &[IndicatorMatch]) -> Vec<String> {
    let mut interventions = vec![
        "Validate feelings and express empathy".to_string(),
        "Assess immediate safety".to_string(),
    ];

    if level >= RiskLevel::High {
        interventions.push("Administer a structured suicide severity interview".to_string());
        interventions.push("Create a safety plan".to_string());
        interventions.push("Discuss removing access to lethal means".to_string());
        interventions.push("Establish 24-hour follow-up".to_string());
    }

    if level >= RiskLevel::Moderate {
        interventions.push("Explore protective factors".to_string());
        interventions.push("Identify support system".to_string());
        interventions.push("Provide coping strategies".to_string());
    }

    if matches
        .iter()
        .any(|m| m.category == IndicatorCategory::SubstanceUse)
    {
        interventions.push("Assess substance use and provide resources".to_string());
    }

    if matches
        .iter()
        .any(|m| m.category == IndicatorCategory::PsychosisSignal)
    {
        interventions.push("Evaluate for psychotic symptoms".to_string());
    }

    interventions
}

/// Escalation path for the given severity. Present only at `High` and above.
pub fn escalation_path(level: RiskLevel) -> Option<EscalationPath> {
    match level {
        RiskLevel::Crisis => Some(EscalationPath {
            urgency: EscalationUrgency::Immediate,
            contact_kinds: vec![ContactKind::EmergencyServices, ContactKind::CrisisTeam],
            protocol: "Initiate emergency response protocol".to_string(),
            documentation: "Document all interactions and interventions".to_string(),
        }),
        RiskLevel::High => Some(EscalationPath {
            urgency: EscalationUrgency::Urgent,
            contact_kinds: vec![
                ContactKind::CrisisHotline,
                ContactKind::MentalHealthProfessional,
            ],
            protocol: "Warm handoff to a crisis counselor".to_string(),
            documentation: "Complete a full risk assessment record".to_string(),
        }),
        _ => None,
    }
}

/// The fixed safety-plan template. Present only at `Moderate` and above.
pub fn safety_plan(level: RiskLevel) -> Option<SafetyPlan> {
    if level < RiskLevel::Moderate {
        return None;
    }

    Some(SafetyPlan {
        warning_signs: vec![
            "Feeling hopeless or trapped".to_string(),
            "Increased substance use".to_string(),
            "Withdrawing from others".to_string(),
            "Extreme mood changes".to_string(),
        ],
        coping_strategies: vec![
            "Deep breathing exercises".to_string(),
            "Go for a walk".to_string(),
            "Listen to calming music".to_string(),
            "Call a friend".to_string(),
        ],
        support_contacts: vec![
            "Trusted friend or family member".to_string(),
            "Mental health professional".to_string(),
            "Local crisis hotline".to_string(),
            "Emergency services".to_string(),
        ],
        safe_environment: vec![
            "Remove or secure weapons".to_string(),
            "Limit access to medications".to_string(),
            "Have someone stay with you".to_string(),
        ],
        reasons_for_living: vec![
            "Identify personal strengths".to_string(),
            "List important relationships".to_string(),
            "Future goals and dreams".to_string(),
        ],
    })
}
