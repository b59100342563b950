pub mod db;
pub mod handlers;
pub mod models;
pub mod sync;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::sync::{Reconciler, SystemClock};

/// Shared state handed to every request handler.
pub struct AppState {
    pub pool: PgPool,
    pub reconciler: Reconciler,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let reconciler = Reconciler::new(pool.clone(), Arc::new(SystemClock));
        Self { pool, reconciler }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/patients",
            get(handlers::patients::list).post(handlers::patients::reconcile),
        )
        .route(
            "/payments",
            get(handlers::payments::list).post(handlers::payments::reconcile),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
