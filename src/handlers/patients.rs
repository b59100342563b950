use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::{numeric_bound, ReconcileResponse};
use crate::db;
use crate::models::{PatientSummary, PatientUpsert};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    payment_min: Option<String>,
    payment_max: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub result: Vec<PatientSummary>,
}

/// `POST /patients`: reconcile the patients table against the posted batch.
pub async fn reconcile(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<PatientUpsert>>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    state.reconciler.reconcile_patients(&batch).await?;
    Ok(Json(ReconcileResponse { result: true }))
}

/// `GET /patients`: per-patient payment totals, optionally bounded by
/// `payment_min` / `payment_max`.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let min_sum = numeric_bound(params.payment_min.as_deref());
    let max_sum = numeric_bound(params.payment_max.as_deref());

    let result = db::patients::list_with_payment_totals(&state.pool, min_sum, max_sum).await?;
    Ok(Json(ListResponse { result }))
}
