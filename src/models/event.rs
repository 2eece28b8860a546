use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::JobStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEventKind {
    Accepted,
    Rejected,
    StatusChanged { status: JobStatus },
    Settled { total_amount: f64 },
}

/// Pushed to websocket subscribers whenever a booking or job changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobEvent {
    pub id: Uuid,
    pub booking_id: String,
    #[serde(flatten)]
    pub kind: JobEventKind,
    pub at: DateTime<Utc>,
}

impl JobEvent {
    pub fn new(booking_id: impl Into<String>, kind: JobEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: booking_id.into(),
            kind,
            at: Utc::now(),
        }
    }
}
