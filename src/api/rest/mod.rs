pub mod bookings;
pub mod extract;
pub mod jobs;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::catalog::{ScrapCategory, SCRAP_CATEGORIES};
use crate::models::session::VendorSession;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(bookings::router())
        .merge(jobs::router())
        .route("/session", get(session))
        .route("/categories", get(categories))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    pending_bookings: usize,
    active_job: Option<String>,
    completed_jobs: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let desk = state.desk.lock().await;

    Json(HealthResponse {
        status: "ok",
        pending_bookings: desk.pending().len(),
        active_job: desk.active_job().map(|job| job.id().to_string()),
        completed_jobs: state.completed.len(),
    })
}

async fn session(State(state): State<Arc<AppState>>) -> Json<VendorSession> {
    Json(state.desk.lock().await.session().clone())
}

async fn categories() -> Json<&'static [ScrapCategory]> {
    Json(SCRAP_CATEGORIES)
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
