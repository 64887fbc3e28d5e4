use std::collections::HashSet;

use super::knowledge::KnowledgeBase;
use super::types::{DetectedSymptom, UrgencyLevel};

/// Symptom phrasings that force escalation to at least `High` on their
/// own, regardless of what else was detected.
const ALARM_SYMPTOMS: &[&str] = &[
    "dificultad respiratoria",
    "dificultad para respirar",
    "falta de aire",
    "ahogo",
    "no puedo respirar",
    "me falta el aire",
    "dolor en el pecho",
    "fiebre alta",
    "labios morados",
    "confusion",
];

/// Flat confidence when at least one disease was specifically identified.
pub const DISEASE_CONFIDENCE: f64 = 0.85;
/// Base of the symptom-only confidence band.
pub const SYMPTOM_BASE_CONFIDENCE: f64 = 0.70;
/// Increment per additional distinct symptom keyword.
pub const SYMPTOM_CONFIDENCE_STEP: f64 = 0.02;
/// Upper bound of the symptom-only band, below the disease band.
pub const SYMPTOM_CONFIDENCE_CAP: f64 = 0.84;
/// Baseline when nothing was recognized.
pub const FALLBACK_CONFIDENCE: f64 = 0.30;

/// Whether a detected symptom is in the alarm set. Both the matched
/// keyword and its category label are tested, so a loaded registry whose
/// category is labeled "dificultad respiratoria" escalates even when the
/// matched keyword itself is not an alarm phrasing.
pub fn is_alarm_symptom(symptom: &DetectedSymptom, kb: &KnowledgeBase) -> bool {
    if ALARM_SYMPTOMS.contains(&symptom.keyword.as_str()) {
        return true;
    }
    kb.category_label(&symptom.category_id)
        .is_some_and(|label| ALARM_SYMPTOMS.contains(&label))
}

/// Derive urgency and confidence from what the extractor found.
///
/// Diseases dominate: the highest base urgency among them wins. With
/// symptoms only, urgency starts at medium and the alarm rule can raise
/// it (never lower it). With nothing detected the query degrades to the
/// very_low / low-confidence fallback instead of failing.
pub fn score(
    disease_ids: &[String],
    symptoms: &[DetectedSymptom],
    kb: &KnowledgeBase,
) -> (UrgencyLevel, f64) {
    if !disease_ids.is_empty() {
        let urgency = disease_ids
            .iter()
            .filter_map(|id| kb.disease(id))
            .map(|d| d.base_urgency)
            .max()
            .unwrap_or(UrgencyLevel::Medium);
        return (urgency, DISEASE_CONFIDENCE);
    }

    if !symptoms.is_empty() {
        let distinct: HashSet<&str> =
            symptoms.iter().map(|s| s.keyword.as_str()).collect();
        let confidence = (SYMPTOM_BASE_CONFIDENCE
            + SYMPTOM_CONFIDENCE_STEP * (distinct.len() - 1) as f64)
            .min(SYMPTOM_CONFIDENCE_CAP);

        let mut urgency = UrgencyLevel::Medium;
        if symptoms.iter().any(|s| is_alarm_symptom(s, kb)) {
            urgency = urgency.at_least(UrgencyLevel::High);
        }
        return (urgency, confidence);
    }

    (UrgencyLevel::VeryLow, FALLBACK_CONFIDENCE)
}
