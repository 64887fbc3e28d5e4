use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

// ---------------------------------------------------------------------------
// UrgencyLevel
// ---------------------------------------------------------------------------

/// Ordinal urgency classification attached to a disease or computed for a
/// query. Ordering is total: very_low < low < medium < high < critical.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Escalation-only combine: raises to `floor` when below it, never lowers.
    pub fn at_least(self, floor: UrgencyLevel) -> UrgencyLevel {
        self.max(floor)
    }
}

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// What the caller is asking about a disease.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Definition,
    Symptoms,
    Treatment,
    Prevention,
    Action,
    General,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Symptoms => "symptoms",
            Self::Treatment => "treatment",
            Self::Prevention => "prevention",
            Self::Action => "action",
            Self::General => "general",
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// An incoming analysis request. Created per call; never persisted here.
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub context: String,
    pub patient_id: Option<String>,
    pub include_recommendations: bool,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: config::DEFAULT_CONTEXT.to_string(),
            patient_id: None,
            include_recommendations: true,
        }
    }
}

// ---------------------------------------------------------------------------
// DetectedSymptom & AnalysisResult
// ---------------------------------------------------------------------------

/// A symptom keyword matched in the query, tagged with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectedSymptom {
    pub keyword: String,
    pub category_id: String,
}

/// Fully-populated outcome of one analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    /// Disease ids, deduplicated, ordered by first-match position.
    pub detected_diseases: Vec<String>,
    /// Matched symptom keywords, deduplicated, ordered by first-match position.
    pub detected_symptoms: Vec<DetectedSymptom>,
    pub question_type: QuestionType,
    pub urgency_level: UrgencyLevel,
    /// Heuristic certainty in [0, 1].
    pub confidence: f64,
    /// Rendered answer; always ends with the fixed disclaimer.
    pub message: String,
    /// Empty when the caller opted out of recommendations.
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// AnalysisError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Query must be at least 3 characters long")]
    QueryTooShort,

    #[error("Knowledge registry load failed ({0}): {1}")]
    KnowledgeLoad(String, String),

    #[error("Knowledge registry parse failed ({0}): {1}")]
    KnowledgeParse(String, String),
}
