//! Read-only knowledge registry endpoints.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;

use crate::api::types::{ApiContext, DiseaseSummary};

/// `GET /api/analysis/diseases` — the disease catalog.
pub async fn diseases(State(ctx): State<ApiContext>) -> Json<Vec<DiseaseSummary>> {
    let catalog = ctx
        .engine
        .knowledge()
        .diseases()
        .iter()
        .map(|d| DiseaseSummary {
            id: d.id.clone(),
            name: d.display_name.clone(),
            description: d.description.clone(),
            urgency: d.base_urgency,
        })
        .collect();
    Json(catalog)
}

/// `GET /api/analysis/symptoms` — symptom-category-to-keyword map.
pub async fn symptoms(
    State(ctx): State<ApiContext>,
) -> Json<BTreeMap<String, Vec<String>>> {
    let map = ctx
        .engine
        .knowledge()
        .categories()
        .iter()
        .map(|c| (c.id.clone(), c.keywords.clone()))
        .collect();
    Json(map)
}
