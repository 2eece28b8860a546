use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::rest::extract::{optional_json, AppJson, AppPath};
use crate::engine::ledger::EarningsSummary;
use crate::engine::settlement::SettlementSummary;
use crate::error::{AppError, DomainError};
use crate::models::event::{JobEvent, JobEventKind};
use crate::models::job::{ActiveJob, CompletedJob, JobStatus};
use crate::models::session::Notice;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/job", get(get_active_job))
        .route("/job/status", post(advance_status))
        .route("/job/complete", post(request_completion))
        .route("/job/settlement", get(get_settlement))
        .route("/job/settlement/items", post(add_line_item))
        .route(
            "/job/settlement/items/:index",
            patch(set_weight).delete(remove_line_item),
        )
        .route("/job/finalize", post(finalize_job))
        .route("/jobs/completed", get(list_completed))
        .route("/earnings", get(earnings))
}

#[derive(Deserialize)]
pub struct AdvanceRequest {
    pub status: JobStatus,
}

#[derive(Deserialize, Default)]
pub struct AddItemRequest {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct SetWeightRequest {
    pub weight: f64,
}

#[derive(Serialize)]
pub struct JobResponse {
    pub notice: Notice,
    pub job: ActiveJob,
}

#[derive(Serialize)]
pub struct SettlementResponse {
    pub notice: Notice,
    pub settlement: SettlementSummary,
}

#[derive(Serialize)]
pub struct FinalizeResponse {
    pub notice: Notice,
    pub job: CompletedJob,
}

async fn get_active_job(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActiveJob>, AppError> {
    let desk = state.desk.lock().await;
    let job = desk.active_job().ok_or(DomainError::NoActiveJob)?;
    Ok(Json(job.clone()))
}

async fn advance_status(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<AdvanceRequest>,
) -> Result<Json<JobResponse>, AppError> {
    let job = state.desk.lock().await.advance_status(payload.status)?;

    state
        .metrics
        .status_transitions_total
        .with_label_values(&[job.status.label()])
        .inc();
    state.publish(JobEvent::new(
        job.id(),
        JobEventKind::StatusChanged { status: job.status },
    ));

    let notice = match job.status {
        JobStatus::ReadyForSettlement => Notice::info("Pickup done, enter the scrap weights"),
        status => Notice::success(format!("Status updated to {status}")),
    };
    Ok(Json(JobResponse { notice, job }))
}

async fn request_completion(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettlementResponse>, AppError> {
    let mut desk = state.desk.lock().await;
    let settlement = desk.request_completion()?.summary();

    Ok(Json(SettlementResponse {
        notice: Notice::info("Add every scrap category you collected"),
        settlement,
    }))
}

async fn get_settlement(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettlementSummary>, AppError> {
    let desk = state.desk.lock().await;
    let sheet = match desk.settlement() {
        Some(sheet) => sheet,
        None => {
            let job = desk.active_job().ok_or(DomainError::NoActiveJob)?;
            return Err(DomainError::NotReady(job.status).into());
        }
    };
    Ok(Json(sheet.summary()))
}

async fn add_line_item(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SettlementResponse>, AppError> {
    let AddItemRequest { category } = optional_json(&body)?;

    let mut desk = state.desk.lock().await;
    let settlement = desk.add_line_item(category.as_deref())?.summary();
    let added = settlement
        .items
        .last()
        .map(|item| item.category.clone())
        .unwrap_or_default();

    Ok(Json(SettlementResponse {
        notice: Notice::success(format!("{added} added")),
        settlement,
    }))
}

async fn set_weight(
    State(state): State<Arc<AppState>>,
    AppPath(index): AppPath<usize>,
    AppJson(payload): AppJson<SetWeightRequest>,
) -> Result<Json<SettlementResponse>, AppError> {
    let mut desk = state.desk.lock().await;
    let settlement = desk.set_weight(index, payload.weight)?.summary();

    Ok(Json(SettlementResponse {
        notice: Notice::info(format!("Total ₹{:.2}", settlement.total_amount)),
        settlement,
    }))
}

async fn remove_line_item(
    State(state): State<Arc<AppState>>,
    AppPath(index): AppPath<usize>,
) -> Result<Json<SettlementResponse>, AppError> {
    let mut desk = state.desk.lock().await;
    let settlement = desk.remove_line_item(index)?.summary();

    Ok(Json(SettlementResponse {
        notice: Notice::info("Line item removed"),
        settlement,
    }))
}

async fn finalize_job(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinalizeResponse>, AppError> {
    if let Err(err) = state.simulator.run("finalize job").await {
        state
            .metrics
            .simulated_failures_total
            .with_label_values(&["finalize_job"])
            .inc();
        return Err(err);
    }

    let completed = state.desk.lock().await.finalize_job()?;

    state
        .completed
        .insert(completed.job.id().to_string(), completed.clone());
    state.metrics.settlements_total.inc();
    state
        .metrics
        .settlement_amount
        .observe(completed.total_amount);
    state.metrics.active_jobs.set(0);
    state.publish(JobEvent::new(
        completed.job.id(),
        JobEventKind::Settled {
            total_amount: completed.total_amount,
        },
    ));

    Ok(Json(FinalizeResponse {
        notice: Notice::success(format!(
            "Job completed! ₹{:.2} to collect via {:?}",
            completed.total_amount, completed.job.booking.payment_mode
        )),
        job: completed,
    }))
}

async fn list_completed(State(state): State<Arc<AppState>>) -> Json<Vec<CompletedJob>> {
    let mut jobs: Vec<CompletedJob> = state
        .completed
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    jobs.sort_by(|a, b| b.settled_at.cmp(&a.settled_at));

    Json(jobs)
}

async fn earnings(State(state): State<Arc<AppState>>) -> Json<EarningsSummary> {
    let jobs: Vec<CompletedJob> = state
        .completed
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    Json(EarningsSummary::from_jobs(&jobs, Utc::now()))
}
