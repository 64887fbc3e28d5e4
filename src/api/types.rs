//! Shared types for the analysis API layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::knowledge::KnowledgeBase;
use crate::analysis::types::{AnalysisResult, QuestionType, UrgencyLevel};
use crate::config;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<AnalysisEngine>,
}

impl ApiContext {
    pub fn new(engine: Arc<AnalysisEngine>) -> Self {
        Self { engine }
    }
}

fn default_context() -> String {
    config::DEFAULT_CONTEXT.to_string()
}

fn default_true() -> bool {
    true
}

/// Body of `POST /api/analysis/query`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
    #[serde(default = "default_context")]
    pub context: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default = "default_true")]
    pub include_recommendations: bool,
}

/// Success envelope of `POST /api/analysis/query`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub message: String,
    pub analysis: AnalysisSection,
    pub recommendations: Vec<String>,
    pub urgency_level: UrgencyLevel,
    pub confidence: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisSection {
    pub detected_diseases: Vec<String>,
    /// Category labels of the matched symptoms, deduplicated,
    /// first-occurrence order.
    pub detected_symptoms: Vec<String>,
    pub question_type: QuestionType,
    pub detailed_info: DetailedInfo,
}

#[derive(Debug, Serialize)]
pub struct DetailedInfo {
    /// Display name of the primary detected disease, when any.
    pub disease: Option<String>,
}

impl AnalyzeResponse {
    pub fn from_result(result: &AnalysisResult, kb: &KnowledgeBase) -> Self {
        let mut detected_symptoms: Vec<String> = Vec::new();
        for s in &result.detected_symptoms {
            let label = kb
                .category_label(&s.category_id)
                .unwrap_or(&s.keyword)
                .to_string();
            if !detected_symptoms.contains(&label) {
                detected_symptoms.push(label);
            }
        }

        let primary = result
            .detected_diseases
            .first()
            .and_then(|id| kb.disease(id))
            .map(|d| d.display_name.clone());

        Self {
            status: "success",
            message: result.message.clone(),
            analysis: AnalysisSection {
                detected_diseases: result.detected_diseases.clone(),
                detected_symptoms,
                question_type: result.question_type,
                detailed_info: DetailedInfo { disease: primary },
            },
            recommendations: result.recommendations.clone(),
            urgency_level: result.urgency_level,
            confidence: result.confidence,
            timestamp: result.timestamp.to_rfc3339(),
        }
    }
}

/// One entry of `GET /api/analysis/diseases`.
#[derive(Debug, Serialize)]
pub struct DiseaseSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub urgency: UrgencyLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::Query;

    #[test]
    fn request_defaults_apply() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"query": "¿Qué es el asma?"}"#).unwrap();
        assert_eq!(req.context, "respiratory_diseases");
        assert!(req.include_recommendations);
        assert!(req.patient_id.is_none());
    }

    #[test]
    fn symptom_labels_deduplicated_in_response() {
        let kb = KnowledgeBase::respiratory();
        let engine = AnalysisEngine::new(kb);
        let result = engine
            .analyze(&Query::new("tengo fiebre alta y mucha fiebre"))
            .unwrap();
        let response = AnalyzeResponse::from_result(&result, engine.knowledge());
        // Both keywords map to the single "fiebre" category label.
        let fever_labels = response
            .analysis
            .detected_symptoms
            .iter()
            .filter(|l| l.as_str() == "fiebre")
            .count();
        assert_eq!(fever_labels, 1);
    }

    #[test]
    fn breathing_difficulty_reports_category_label() {
        let engine = AnalysisEngine::new(KnowledgeBase::respiratory());
        let result = engine
            .analyze(&Query::new("Tengo tos, fiebre y dificultad para respirar"))
            .unwrap();
        let response = AnalyzeResponse::from_result(&result, engine.knowledge());
        assert!(response
            .analysis
            .detected_symptoms
            .contains(&"dificultad respiratoria".to_string()));
    }

    #[test]
    fn detailed_info_names_primary_disease() {
        let engine = AnalysisEngine::new(KnowledgeBase::respiratory());
        let result = engine
            .analyze(&Query::new("¿Qué es la pulmonía?"))
            .unwrap();
        let response = AnalyzeResponse::from_result(&result, engine.knowledge());
        assert_eq!(
            response.analysis.detailed_info.disease.as_deref(),
            Some("Neumonía")
        );
        assert_eq!(response.status, "success");
    }
}
