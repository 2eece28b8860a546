use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::{BookingRequest, GeoPoint};
use crate::models::settlement::ScrapLineItem;

/// Delivery progress of an accepted booking.
///
/// `ReadyForSettlement` goes over the wire as `completed`: the vendor has finished the
/// pickup but the payment has not been worked out yet. Only `Settled` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobStatus {
    #[serde(rename = "on-the-way")]
    OnTheWay,
    #[serde(rename = "arrived")]
    Arrived,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    ReadyForSettlement,
    #[serde(rename = "settled")]
    Settled,
}

impl JobStatus {
    /// Statuses a vendor steps through by hand, in order.
    pub const PROGRESSION: [JobStatus; 4] = [
        JobStatus::OnTheWay,
        JobStatus::Arrived,
        JobStatus::InProgress,
        JobStatus::ReadyForSettlement,
    ];

    /// The status an explicit advance may move to. `Settled` is only reached by settlement.
    pub fn successor(self) -> Option<JobStatus> {
        let position = Self::PROGRESSION.iter().position(|status| *status == self)?;
        Self::PROGRESSION.get(position + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::OnTheWay => "on-the-way",
            JobStatus::Arrived => "arrived",
            JobStatus::InProgress => "in-progress",
            JobStatus::ReadyForSettlement => "completed",
            JobStatus::Settled => "settled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveJob {
    #[serde(flatten)]
    pub booking: BookingRequest,
    pub status: JobStatus,
    pub customer_location: GeoPoint,
    pub accepted_at: DateTime<Utc>,
}

impl ActiveJob {
    pub fn id(&self) -> &str {
        &self.booking.id
    }

    /// The status an "advance" action would target, if any.
    pub fn next_status(&self) -> Option<JobStatus> {
        self.status.successor()
    }
}

/// A settled job. Produced once per job by finalizing its settlement sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedJob {
    pub settlement_id: Uuid,
    #[serde(flatten)]
    pub job: ActiveJob,
    pub line_items: Vec<ScrapLineItem>,
    pub total_amount: f64,
    pub settled_at: DateTime<Utc>,
}
