//! Query analysis endpoint.

use axum::extract::State;
use axum::Json;

use crate::analysis::types::Query;
use crate::api::error::ApiError;
use crate::api::types::{AnalyzeRequest, AnalyzeResponse, ApiContext};

/// `POST /api/analysis/query` — run the full analysis pipeline on one
/// free-text query.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let query = Query {
        text: req.query,
        context: req.context,
        patient_id: req.patient_id,
        include_recommendations: req.include_recommendations,
    };

    let result = ctx.engine.analyze(&query)?;
    Ok(Json(AnalyzeResponse::from_result(
        &result,
        ctx.engine.knowledge(),
    )))
}
