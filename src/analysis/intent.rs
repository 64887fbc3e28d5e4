use super::types::QuestionType;

/// Ordered intent rules. Triggers are pre-normalized (lowercase, accents
/// folded) because classification runs on normalized text; the accented
/// spellings collapse onto these after normalization.
///
/// The order is a deliberate precedence: a query can contain triggers for
/// several intents ("síntomas ... ¿qué hago?") and the first matching
/// rule wins.
const INTENT_RULES: &[(QuestionType, &[&str])] = &[
    (
        QuestionType::Definition,
        &["que es", "define", "explicame que es"],
    ),
    (QuestionType::Symptoms, &["sintomas", "senales de"]),
    (
        QuestionType::Treatment,
        &["como se trata", "tratamiento", "que medicina"],
    ),
    (
        QuestionType::Prevention,
        &["como prevenir", "prevencion", "como evitar"],
    ),
    (
        QuestionType::Action,
        &["que hago", "debo ir al medico", "que hacer si"],
    ),
];

/// Classify the caller's intent from the normalized query text.
/// Falls back to `General` when no trigger matches.
pub fn classify(normalized_text: &str) -> QuestionType {
    for (intent, triggers) in INTENT_RULES {
        if triggers.iter().any(|t| normalized_text.contains(t)) {
            return *intent;
        }
    }
    QuestionType::General
}
