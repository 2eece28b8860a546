use tracing::{info, warn};

use crate::catalog::RateCard;
use crate::engine::settlement::SettlementSheet;
use crate::error::DomainError;
use crate::models::job::{ActiveJob, JobStatus};

/// Moves `job` to `target` when it is exactly the next step of the progression.
pub fn advance(job: &mut ActiveJob, target: JobStatus) -> Result<&ActiveJob, DomainError> {
    let from = job.status;

    if job.next_status() != Some(target) {
        warn!(booking_id = %job.id(), from = %from, to = %target, "rejected status change");
        return Err(DomainError::InvalidTransition { from, to: target });
    }

    job.status = target;
    info!(booking_id = %job.id(), from = %from, to = %target, "job status advanced");
    Ok(job)
}

/// Opens a settlement sheet for a job whose pickup is done.
pub fn request_completion(
    job: &ActiveJob,
    rates: &RateCard,
) -> Result<SettlementSheet, DomainError> {
    if job.status != JobStatus::ReadyForSettlement {
        return Err(DomainError::NotReady(job.status));
    }

    let sheet = SettlementSheet::open(job.clone(), rates.clone())?;
    info!(booking_id = %job.id(), "settlement opened");
    Ok(sheet)
}
