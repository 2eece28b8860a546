use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::rest::extract::{optional_json, AppPath, AppQuery};
use crate::error::AppError;
use crate::models::booking::{BookingRequest, GeoPoint};
use crate::models::event::{JobEvent, JobEventKind};
use crate::models::job::ActiveJob;
use crate::models::session::Notice;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/refresh", post(refresh_bookings))
        .route("/bookings/:id/accept", post(accept_booking))
        .route("/bookings/:id/reject", post(reject_booking))
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub sort: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AcceptRequest {
    pub location: Option<GeoPoint>,
}

#[derive(Serialize)]
pub struct BookingsResponse {
    pub notice: Notice,
    pub bookings: Vec<BookingRequest>,
}

#[derive(Serialize)]
pub struct AcceptResponse {
    pub notice: Notice,
    pub job: ActiveJob,
}

#[derive(Serialize)]
pub struct RejectResponse {
    pub notice: Notice,
}

fn by_priority(query: &ListQuery) -> Result<bool, AppError> {
    match query.sort.as_deref() {
        None | Some("created") => Ok(false),
        Some("priority") => Ok(true),
        Some(other) => Err(AppError::BadRequest(format!(
            "unknown sort: {other}, expected created/priority"
        ))),
    }
}

async fn list_bookings(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<BookingRequest>>, AppError> {
    let by_priority = by_priority(&query)?;
    let desk = state.desk.lock().await;
    Ok(Json(desk.list_pending(by_priority)))
}

async fn refresh_bookings(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<BookingsResponse>, AppError> {
    let by_priority = by_priority(&query)?;

    if let Err(err) = state.simulator.run("refresh bookings").await {
        state
            .metrics
            .simulated_failures_total
            .with_label_values(&["refresh_bookings"])
            .inc();
        return Err(err);
    }

    let desk = state.desk.lock().await;
    let bookings = desk.list_pending(by_priority);
    let notice = if bookings.is_empty() {
        Notice::info("No new bookings right now")
    } else {
        Notice::success(format!("{} bookings available", bookings.len()))
    };

    Ok(Json(BookingsResponse { notice, bookings }))
}

async fn accept_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
    body: Bytes,
) -> Result<Json<AcceptResponse>, AppError> {
    let AcceptRequest { location } = optional_json(&body)?;

    let job = {
        let mut desk = state.desk.lock().await;
        desk.accept_booking(&id, location)?
    };

    state
        .metrics
        .bookings_total
        .with_label_values(&["accepted"])
        .inc();
    state.metrics.active_jobs.set(1);
    state.publish(JobEvent::new(job.id(), JobEventKind::Accepted));

    Ok(Json(AcceptResponse {
        notice: Notice::success(format!(
            "Booking accepted! Head to {}",
            job.booking.customer_name
        )),
        job,
    }))
}

async fn reject_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<RejectResponse>, AppError> {
    state.desk.lock().await.reject_booking(&id)?;

    state
        .metrics
        .bookings_total
        .with_label_values(&["rejected"])
        .inc();
    state.publish(JobEvent::new(id.clone(), JobEventKind::Rejected));
    info!(booking_id = %id, "booking removed from pending list");

    Ok(Json(RejectResponse {
        notice: Notice::info("Booking rejected"),
    }))
}
