use crate::catalog::RateCard;
use crate::engine::intake::BookingIntake;
use crate::engine::lifecycle::{advance, request_completion};
use crate::engine::settlement::SettlementSheet;
use crate::error::DomainError;
use crate::models::booking::{BookingRequest, GeoPoint};
use crate::models::job::{ActiveJob, CompletedJob, JobStatus};
use crate::models::session::VendorSession;

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Fulfilling(ActiveJob),
    Settling(SettlementSheet),
}

/// Everything one signed-in vendor works on: pending requests and at most one job.
#[derive(Debug, Clone)]
pub struct PickupDesk {
    session: VendorSession,
    intake: BookingIntake,
    rates: RateCard,
    stage: Stage,
}

impl PickupDesk {
    pub fn new(session: VendorSession, intake: BookingIntake, rates: RateCard) -> Self {
        Self {
            session,
            intake,
            rates,
            stage: Stage::Idle,
        }
    }

    pub fn session(&self) -> &VendorSession {
        &self.session
    }

    pub fn pending(&self) -> &BookingIntake {
        &self.intake
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    pub fn active_job(&self) -> Option<&ActiveJob> {
        match &self.stage {
            Stage::Idle => None,
            Stage::Fulfilling(job) => Some(job),
            Stage::Settling(sheet) => Some(sheet.job()),
        }
    }

    pub fn settlement(&self) -> Option<&SettlementSheet> {
        match &self.stage {
            Stage::Settling(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn accept_booking(
        &mut self,
        id: &str,
        location: Option<GeoPoint>,
    ) -> Result<ActiveJob, DomainError> {
        if let Some(job) = self.active_job() {
            return Err(DomainError::JobAlreadyActive(job.id().to_string()));
        }

        let job = self.intake.accept(id, location)?;
        self.stage = Stage::Fulfilling(job.clone());
        Ok(job)
    }

    pub fn reject_booking(&mut self, id: &str) -> Result<(), DomainError> {
        self.intake.reject(id)
    }

    pub fn advance_status(&mut self, target: JobStatus) -> Result<ActiveJob, DomainError> {
        match &mut self.stage {
            Stage::Idle => Err(DomainError::NoActiveJob),
            Stage::Fulfilling(job) => advance(job, target).cloned(),
            Stage::Settling(sheet) => Err(DomainError::InvalidTransition {
                from: sheet.job().status,
                to: target,
            }),
        }
    }

    /// Hands a ready job over to settlement. Repeating the request keeps the open sheet.
    pub fn request_completion(&mut self) -> Result<&SettlementSheet, DomainError> {
        let sheet = match &self.stage {
            Stage::Idle => return Err(DomainError::NoActiveJob),
            Stage::Fulfilling(job) => request_completion(job, &self.rates)?,
            Stage::Settling(sheet) => sheet.clone(),
        };

        self.stage = Stage::Settling(sheet);
        self.settlement().ok_or(DomainError::NoActiveJob)
    }

    pub fn add_line_item(
        &mut self,
        category: Option<&str>,
    ) -> Result<&SettlementSheet, DomainError> {
        let sheet = self.sheet_mut()?;
        match category {
            Some(category) => sheet.add_line_item(category)?,
            None => {
                sheet.add_next_available()?;
            }
        }
        Ok(sheet)
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<&SettlementSheet, DomainError> {
        let sheet = self.sheet_mut()?;
        sheet.remove_line_item(index)?;
        Ok(sheet)
    }

    pub fn set_weight(
        &mut self,
        index: usize,
        weight: f64,
    ) -> Result<&SettlementSheet, DomainError> {
        let sheet = self.sheet_mut()?;
        sheet.set_weight(index, weight)?;
        Ok(sheet)
    }

    pub fn settlement_total(&self) -> Result<f64, DomainError> {
        match &self.stage {
            Stage::Idle => Err(DomainError::NoActiveJob),
            Stage::Fulfilling(job) => Err(DomainError::NotReady(job.status)),
            Stage::Settling(sheet) => Ok(sheet.compute_total()),
        }
    }

    /// Settles the active job and clears the desk for the next booking.
    pub fn finalize_job(&mut self) -> Result<CompletedJob, DomainError> {
        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Settling(sheet) => match sheet.finalize() {
                Ok(completed) => Ok(completed),
                Err((sheet, err)) => {
                    self.stage = Stage::Settling(sheet);
                    Err(err)
                }
            },
            Stage::Fulfilling(job) => {
                let status = job.status;
                self.stage = Stage::Fulfilling(job);
                Err(DomainError::NotReady(status))
            }
            Stage::Idle => Err(DomainError::NoActiveJob),
        }
    }

    /// Pending requests, with the active job's booking excluded by construction.
    pub fn list_pending(&self, by_priority: bool) -> Vec<BookingRequest> {
        if by_priority {
            self.intake.list_pending_by_priority()
        } else {
            self.intake.list_pending()
        }
    }

    fn sheet_mut(&mut self) -> Result<&mut SettlementSheet, DomainError> {
        match &mut self.stage {
            Stage::Settling(sheet) => Ok(sheet),
            Stage::Fulfilling(job) => Err(DomainError::NotReady(job.status)),
            Stage::Idle => Err(DomainError::NoActiveJob),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PickupDesk;
    use crate::catalog::RateCard;
    use crate::engine::intake::BookingIntake;
    use crate::error::DomainError;
    use crate::models::booking::GeoPoint;
    use crate::models::job::JobStatus;
    use crate::models::session::VendorSession;

    fn desk() -> PickupDesk {
        PickupDesk::new(
            VendorSession::new("vendor-1", "Green Scrap Co", "+91 90000 00000"),
            BookingIntake::with_fixtures(GeoPoint {
                lat: 28.6139,
                lng: 77.2090,
            }),
            RateCard::default(),
        )
    }

    fn ready_desk(id: &str) -> PickupDesk {
        let mut desk = desk();
        desk.accept_booking(id, None).unwrap();
        desk.advance_status(JobStatus::Arrived).unwrap();
        desk.advance_status(JobStatus::InProgress).unwrap();
        desk.advance_status(JobStatus::ReadyForSettlement).unwrap();
        desk.request_completion().unwrap();
        desk
    }

    #[test]
    fn only_one_job_at_a_time() {
        let mut desk = desk();
        desk.accept_booking("1", None).unwrap();
        let pending = desk.list_pending(false);

        assert_eq!(
            desk.accept_booking("2", None),
            Err(DomainError::JobAlreadyActive("1".to_string()))
        );
        assert_eq!(desk.list_pending(false), pending);
    }

    #[test]
    fn job_operations_need_an_active_job() {
        let mut desk = desk();

        assert_eq!(
            desk.advance_status(JobStatus::Arrived),
            Err(DomainError::NoActiveJob)
        );
        assert!(desk.request_completion().is_err());
        assert_eq!(desk.finalize_job(), Err(DomainError::NoActiveJob));
    }

    #[test]
    fn settlement_operations_wait_for_completion() {
        let mut desk = desk();
        desk.accept_booking("1", None).unwrap();

        assert_eq!(
            desk.add_line_item(Some("Copper")).unwrap_err(),
            DomainError::NotReady(JobStatus::OnTheWay)
        );
        assert_eq!(
            desk.finalize_job(),
            Err(DomainError::NotReady(JobStatus::OnTheWay))
        );
        assert_eq!(desk.active_job().unwrap().status, JobStatus::OnTheWay);
    }

    #[test]
    fn status_is_frozen_once_settling() {
        let mut desk = ready_desk("1");

        assert!(desk.advance_status(JobStatus::Settled).is_err());
        assert_eq!(
            desk.active_job().unwrap().status,
            JobStatus::ReadyForSettlement
        );
    }

    #[test]
    fn zero_total_keeps_job_ready_for_settlement() {
        let mut desk = ready_desk("1");

        assert_eq!(desk.finalize_job(), Err(DomainError::ZeroAmount));
        assert_eq!(
            desk.active_job().unwrap().status,
            JobStatus::ReadyForSettlement
        );
        assert!(desk.settlement().is_some());
    }

    #[test]
    fn full_job_settles_and_frees_the_desk() {
        let mut desk = ready_desk("1");
        desk.add_line_item(Some("Plastic")).unwrap();
        desk.set_weight(0, 5.0).unwrap();
        desk.set_weight(1, 2.0).unwrap();
        assert_eq!(desk.settlement_total(), Ok(96.0));

        let completed = desk.finalize_job().unwrap();

        assert_eq!(completed.total_amount, 96.0);
        assert_eq!(completed.job.status, JobStatus::Settled);
        assert!(desk.active_job().is_none());
        assert!(desk.accept_booking("2", None).is_ok());
    }

    #[test]
    fn repeated_completion_keeps_sheet() {
        let mut desk = ready_desk("2");
        desk.set_weight(0, 3.0).unwrap();

        let sheet = desk.request_completion().unwrap();

        assert_eq!(sheet.items()[0].weight, 3.0);
    }
}
