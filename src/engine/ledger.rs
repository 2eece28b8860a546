use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::job::CompletedJob;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EarningsSummary {
    pub completed_jobs: usize,
    pub total_earned: f64,
    pub earned_today: f64,
}

impl EarningsSummary {
    /// Totals settled jobs; "today" is the UTC calendar day of `now`.
    pub fn from_jobs<'a>(
        jobs: impl IntoIterator<Item = &'a CompletedJob>,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();

        jobs.into_iter().fold(
            Self {
                completed_jobs: 0,
                total_earned: 0.0,
                earned_today: 0.0,
            },
            |mut summary, job| {
                summary.completed_jobs += 1;
                summary.total_earned += job.total_amount;
                if job.settled_at.date_naive() == today {
                    summary.earned_today += job.total_amount;
                }
                summary
            },
        )
    }
}
