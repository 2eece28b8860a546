use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::job::JobStatus;
use crate::models::session::Notice;

/// Rejections raised by the booking, lifecycle and settlement rules.
///
/// Every operation that returns one of these has left its state untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("booking {0} not found")]
    NotFound(String),

    #[error("cannot move job from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    #[error("job is {0}; settlement needs it to be completed first")]
    NotReady(JobStatus),

    #[error("{0} is already on the settlement sheet")]
    AlreadyPresent(String),

    #[error("every scrap category is already on the settlement sheet")]
    NoCategoriesLeft,

    #[error("unknown scrap category: {0}")]
    UnknownCategory(String),

    #[error("a settlement needs at least one line item")]
    MinimumItemsViolation,

    #[error("line item {index} out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("total amount must be greater than zero")]
    ZeroAmount,

    #[error("total amount is too large to settle")]
    AmountOverflow,

    #[error("no active job")]
    NoActiveJob,

    #[error("job {0} is still active")]
    JobAlreadyActive(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("network error while trying to {operation}, please retry")]
    SimulatedNetwork { operation: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(err) => match err {
                DomainError::NotFound(_) | DomainError::NoActiveJob => StatusCode::NOT_FOUND,
                DomainError::IndexOutOfRange { .. } | DomainError::UnknownCategory(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::ZeroAmount | DomainError::AmountOverflow => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                DomainError::InvalidTransition { .. }
                | DomainError::NotReady(_)
                | DomainError::AlreadyPresent(_)
                | DomainError::NoCategoriesLeft
                | DomainError::MinimumItemsViolation
                | DomainError::JobAlreadyActive(_) => StatusCode::CONFLICT,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SimulatedNetwork { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let retryable = matches!(self, AppError::SimulatedNetwork { .. });
        let notice = self.notice();

        let body = Json(json!({
            "error": notice.message,
            "kind": notice.kind,
            "retryable": retryable,
        }));

        (status, body).into_response()
    }
}
