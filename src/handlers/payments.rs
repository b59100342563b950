use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use super::error::ApiError;
use super::{numeric_bound, ReconcileResponse};
use crate::db;
use crate::models::{Payment, PaymentUpsert};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    external_id: Option<String>,
    amount_min: Option<String>,
    amount_max: Option<String>,
}

/// `POST /payments`: reconcile the payments table against the posted batch.
/// Records for unknown patients are skipped, not failed.
pub async fn reconcile(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<PaymentUpsert>>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    state.reconciler.reconcile_payments(&batch).await?;
    Ok(Json(ReconcileResponse { result: true }))
}

/// `GET /payments`: list payments, optionally narrowed to one patient's
/// external id and an amount range.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let amount_min = numeric_bound(params.amount_min.as_deref());
    let amount_max = numeric_bound(params.amount_max.as_deref());

    let payments = db::payments::list(
        &state.pool,
        params.external_id.as_deref(),
        amount_min,
        amount_max,
    )
    .await?;

    Ok(Json(payments))
}
