use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use super::knowledge::KnowledgeBase;
use super::types::{AnalysisError, AnalysisResult, Query};
use super::{compose, extract, intent, normalize, scoring};

/// Minimum trimmed query length accepted for analysis.
const MIN_QUERY_LEN: usize = 3;

/// Runs the full analysis pipeline over a shared immutable knowledge base.
///
/// Each call operates only on its own `Query` plus the read-only registry,
/// so one engine can serve arbitrarily many concurrent requests without
/// locking. The only failure mode is input validation; everything else
/// degrades to the general / very_low / low-confidence path.
pub struct AnalysisEngine {
    kb: KnowledgeBase,
}

impl AnalysisEngine {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Analyze one query: validate, normalize, extract, classify, score,
    /// compose, assemble.
    pub fn analyze(&self, query: &Query) -> Result<AnalysisResult, AnalysisError> {
        let trimmed = query.text.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Err(AnalysisError::QueryTooShort);
        }

        let start = Instant::now();

        let normalized = normalize::normalize(trimmed);
        let (detected_diseases, detected_symptoms) =
            extract::extract(&normalized, &self.kb);
        let question_type = intent::classify(&normalized.text);
        let (urgency_level, confidence) =
            scoring::score(&detected_diseases, &detected_symptoms, &self.kb);
        let (message, recommendations) = compose::compose(
            question_type,
            &detected_diseases,
            &detected_symptoms,
            urgency_level,
            query.include_recommendations,
            &self.kb,
        );

        tracing::info!(
            context = %query.context,
            diseases = detected_diseases.len(),
            symptoms = detected_symptoms.len(),
            question_type = question_type.as_str(),
            urgency = urgency_level.as_str(),
            confidence,
            processing_us = start.elapsed().as_micros() as u64,
            "Query analysis complete"
        );

        Ok(AnalysisResult {
            analysis_id: Uuid::new_v4(),
            detected_diseases,
            detected_symptoms,
            question_type,
            urgency_level,
            confidence,
            message,
            recommendations,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compose::DISCLAIMER;
    use crate::analysis::scoring::{
        DISEASE_CONFIDENCE, FALLBACK_CONFIDENCE, SYMPTOM_BASE_CONFIDENCE,
        SYMPTOM_CONFIDENCE_CAP,
    };
    use crate::analysis::types::{QuestionType, UrgencyLevel};

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(KnowledgeBase::respiratory())
    }

    fn analyze(text: &str) -> AnalysisResult {
        engine().analyze(&Query::new(text)).expect("valid query")
    }

    // --- Documented scenarios ---

    #[test]
    fn definition_query_for_asma() {
        let result = analyze("¿Qué es el asma?");
        assert_eq!(result.detected_diseases, vec!["asma"]);
        assert_eq!(result.question_type, QuestionType::Definition);
        assert_eq!(result.urgency_level, UrgencyLevel::Medium);
        assert_eq!(result.confidence, DISEASE_CONFIDENCE);
    }

    #[test]
    fn symptoms_query_for_neumonia_includes_alarm_section() {
        let result = analyze("Cuáles son los síntomas de neumonia?");
        assert_eq!(result.detected_diseases, vec!["neumonia"]);
        assert_eq!(result.question_type, QuestionType::Symptoms);
        assert_eq!(result.urgency_level, UrgencyLevel::High);
        assert_eq!(result.confidence, DISEASE_CONFIDENCE);
        assert!(result.message.contains("Señales de alarma"));
    }

    #[test]
    fn symptom_only_query_escalates_on_alarm_symptom() {
        let result = analyze("Tengo tos, fiebre y dificultad para respirar");
        assert!(result.detected_diseases.is_empty());
        assert!(result
            .detected_symptoms
            .iter()
            .any(|s| s.category_id == "dificultad_respiratoria"));
        assert!(result.urgency_level >= UrgencyLevel::High);
        assert!(result.confidence >= SYMPTOM_BASE_CONFIDENCE);
        assert!(result.confidence <= SYMPTOM_CONFIDENCE_CAP);
    }

    #[test]
    fn unrecognized_query_degrades_gracefully() {
        let result = analyze("hola");
        assert!(result.detected_diseases.is_empty());
        assert!(result.detected_symptoms.is_empty());
        assert_eq!(result.question_type, QuestionType::General);
        assert_eq!(result.urgency_level, UrgencyLevel::VeryLow);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn too_short_query_is_rejected() {
        let err = engine().analyze(&Query::new("ok")).unwrap_err();
        assert!(matches!(err, AnalysisError::QueryTooShort));

        // Whitespace does not count toward the minimum.
        let err = engine().analyze(&Query::new("  a  ")).unwrap_err();
        assert!(matches!(err, AnalysisError::QueryTooShort));
    }

    #[test]
    fn exactly_three_chars_is_accepted() {
        let result = analyze("tos");
        assert_eq!(result.detected_symptoms[0].keyword, "tos");
    }

    // --- Properties ---

    #[test]
    fn identical_queries_yield_identical_results() {
        let engine = engine();
        let query = Query::new("¿Cómo se trata la gripe?");
        let a = engine.analyze(&query).unwrap();
        let b = engine.analyze(&query).unwrap();
        // Pure pipeline: everything except the generated id and timestamp
        // is a function of (knowledge base, query).
        assert_eq!(a.detected_diseases, b.detected_diseases);
        assert_eq!(a.detected_symptoms, b.detected_symptoms);
        assert_eq!(a.question_type, b.question_type);
        assert_eq!(a.urgency_level, b.urgency_level);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.message, b.message);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn every_alias_is_detected_in_a_definition_query() {
        let engine = engine();
        for disease in engine.knowledge().diseases() {
            for alias in &disease.aliases {
                let result = engine
                    .analyze(&Query::new(format!("¿Qué es {alias}?")))
                    .unwrap();
                assert_eq!(
                    result.question_type,
                    QuestionType::Definition,
                    "alias {alias}"
                );
                assert!(
                    result.detected_diseases.contains(&disease.id),
                    "alias {alias} did not detect {}",
                    disease.id
                );
            }
        }
    }

    #[test]
    fn urgency_equals_max_base_urgency_of_detections() {
        let engine = engine();
        let result = engine
            .analyze(&Query::new("tengo resfriado y puede que tuberculosis"))
            .unwrap();
        let max = result
            .detected_diseases
            .iter()
            .filter_map(|id| engine.knowledge().disease(id))
            .map(|d| d.base_urgency)
            .max()
            .unwrap();
        assert_eq!(result.urgency_level, max);
        assert_eq!(result.urgency_level, UrgencyLevel::High);
    }

    #[test]
    fn confidence_bands_are_disjoint() {
        let with_disease = analyze("creo que tengo gripe");
        assert_eq!(with_disease.confidence, DISEASE_CONFIDENCE);

        let symptom_only = analyze("tengo mocos y cansancio");
        assert!(symptom_only.detected_diseases.is_empty());
        assert!(symptom_only.confidence >= SYMPTOM_BASE_CONFIDENCE);
        assert!(symptom_only.confidence <= SYMPTOM_CONFIDENCE_CAP);

        let nothing = analyze("buenos dias");
        assert!(nothing.confidence < SYMPTOM_BASE_CONFIDENCE);
    }

    #[test]
    fn message_always_ends_with_disclaimer() {
        for text in [
            "¿Qué es el covid?",
            "síntomas de tuberculosis",
            "tengo fiebre alta",
            "hola que tal",
            "¿Debo ir al médico?",
        ] {
            let result = analyze(text);
            assert!(
                result.message.ends_with(DISCLAIMER),
                "missing disclaimer for: {text}"
            );
        }
    }

    #[test]
    fn recommendations_gated_by_flag() {
        let engine = engine();
        let mut query = Query::new("¿Qué es la neumonía?");
        query.include_recommendations = false;
        let result = engine.analyze(&query).unwrap();
        assert!(result.recommendations.is_empty());

        query.include_recommendations = true;
        let result = engine.analyze(&query).unwrap();
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn urgency_is_always_set() {
        // Serialized form never lacks an urgency, even with no detections.
        let result = analyze("xyz abc");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["urgency_level"], "very_low");
    }
}
