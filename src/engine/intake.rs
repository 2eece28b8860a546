use chrono::Utc;
use tracing::info;

use crate::catalog::fixtures::seed_bookings;
use crate::error::DomainError;
use crate::models::booking::{BookingRequest, GeoPoint};
use crate::models::job::{ActiveJob, JobStatus};

/// Pending pickup requests, kept in arrival order.
#[derive(Debug, Clone)]
pub struct BookingIntake {
    pending: Vec<BookingRequest>,
    fallback_location: GeoPoint,
}

impl BookingIntake {
    pub fn new(fallback_location: GeoPoint) -> Self {
        Self {
            pending: Vec::new(),
            fallback_location,
        }
    }

    pub fn with_fixtures(fallback_location: GeoPoint) -> Self {
        let mut intake = Self::new(fallback_location);
        intake.seed(seed_bookings());
        intake
    }

    /// Appends requests whose id is not already pending.
    pub fn seed(&mut self, requests: impl IntoIterator<Item = BookingRequest>) {
        for request in requests {
            if self.position(&request.id).is_none() {
                self.pending.push(request);
            }
        }
    }

    pub fn list_pending(&self) -> Vec<BookingRequest> {
        self.pending.clone()
    }

    /// Groups by priority (high first, unprioritized last); arrival order within a group.
    pub fn list_pending_by_priority(&self) -> Vec<BookingRequest> {
        let mut sorted = self.pending.clone();
        sorted.sort_by_key(|request| (request.priority.is_none(), request.priority));
        sorted
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn accept(
        &mut self,
        id: &str,
        location: Option<GeoPoint>,
    ) -> Result<ActiveJob, DomainError> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        let booking = self.pending.remove(index);

        let job = ActiveJob {
            booking,
            status: JobStatus::OnTheWay,
            customer_location: location.unwrap_or(self.fallback_location),
            accepted_at: Utc::now(),
        };

        info!(booking_id = %job.id(), scrap_type = %job.booking.scrap_type, "booking accepted");
        Ok(job)
    }

    pub fn reject(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        self.pending.remove(index);

        info!(booking_id = %id, "booking rejected");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.pending.iter().position(|request| request.id == id)
    }
}
