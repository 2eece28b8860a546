use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::RateCard;
use crate::error::DomainError;
use crate::models::job::{ActiveJob, CompletedJob, JobStatus};
use crate::models::settlement::ScrapLineItem;

/// Weighed line items for a job that is ready to be paid out.
///
/// A sheet never drops below one item, and every item's category is on the rate card
/// exactly once.
#[derive(Debug, Clone)]
pub struct SettlementSheet {
    job: ActiveJob,
    items: Vec<ScrapLineItem>,
    rates: RateCard,
}

/// Snapshot of a sheet for rendering, total included.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettlementSummary {
    pub job: ActiveJob,
    pub items: Vec<ScrapLineItem>,
    pub total_amount: f64,
}

impl SettlementSheet {
    pub(crate) fn open(job: ActiveJob, rates: RateCard) -> Result<Self, DomainError> {
        let (category, rate) = rates
            .canonical_name(&job.booking.scrap_type)
            .and_then(|name| rates.rate_for(name).map(|rate| (name.to_string(), rate)))
            .or_else(|| {
                rates
                    .entries()
                    .next()
                    .map(|(name, rate)| (name.to_string(), rate))
            })
            .ok_or(DomainError::NoCategoriesLeft)?;

        Ok(Self {
            job,
            items: vec![ScrapLineItem::new(category, rate)],
            rates,
        })
    }

    pub fn job(&self) -> &ActiveJob {
        &self.job
    }

    pub fn items(&self) -> &[ScrapLineItem] {
        &self.items
    }

    pub fn add_line_item(&mut self, category: &str) -> Result<(), DomainError> {
        let name = self
            .rates
            .canonical_name(category)
            .ok_or_else(|| DomainError::UnknownCategory(category.to_string()))?
            .to_string();

        if self.contains(&name) {
            if self.items.len() >= self.rates.len() {
                return Err(DomainError::NoCategoriesLeft);
            }
            return Err(DomainError::AlreadyPresent(name));
        }

        let rate = self
            .rates
            .rate_for(&name)
            .ok_or_else(|| DomainError::UnknownCategory(name.clone()))?;
        self.items.push(ScrapLineItem::new(name, rate));
        Ok(())
    }

    /// Appends the first rate-card category not yet on the sheet.
    pub fn add_next_available(&mut self) -> Result<&ScrapLineItem, DomainError> {
        let (name, rate) = self
            .rates
            .entries()
            .find(|(name, _)| !self.contains(name))
            .map(|(name, rate)| (name.to_string(), rate))
            .ok_or(DomainError::NoCategoriesLeft)?;

        self.items.push(ScrapLineItem::new(name, rate));
        self.items.last().ok_or(DomainError::NoCategoriesLeft)
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<ScrapLineItem, DomainError> {
        self.check_index(index)?;
        if self.items.len() <= 1 {
            return Err(DomainError::MinimumItemsViolation);
        }

        Ok(self.items.remove(index))
    }

    /// Stores `weight`, clamping negatives (and NaN) to zero. A weight that would push the
    /// total past `f64::MAX` is refused and the previous weight kept.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<f64, DomainError> {
        self.check_index(index)?;

        let weight = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        let previous = std::mem::replace(&mut self.items[index].weight, weight);
        if !self.compute_total().is_finite() {
            self.items[index].weight = previous;
            return Err(DomainError::AmountOverflow);
        }
        Ok(weight)
    }

    pub fn compute_total(&self) -> f64 {
        self.items.iter().map(ScrapLineItem::amount).sum()
    }

    pub fn summary(&self) -> SettlementSummary {
        SettlementSummary {
            job: self.job.clone(),
            items: self.items.clone(),
            total_amount: self.compute_total(),
        }
    }

    /// Settles the job. The sheet is consumed only when the total is payable.
    pub fn finalize(self) -> Result<CompletedJob, (Self, DomainError)> {
        let total_amount = self.compute_total();
        if !total_amount.is_finite() {
            return Err((self, DomainError::AmountOverflow));
        }
        if total_amount <= 0.0 {
            return Err((self, DomainError::ZeroAmount));
        }

        let Self { mut job, items, .. } = self;
        job.status = JobStatus::Settled;

        let completed = CompletedJob {
            settlement_id: Uuid::new_v4(),
            job,
            line_items: items,
            total_amount,
            settled_at: Utc::now(),
        };

        info!(
            booking_id = %completed.job.id(),
            settlement_id = %completed.settlement_id,
            total_amount,
            "job settled"
        );
        Ok(completed)
    }

    fn contains(&self, category: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.category.eq_ignore_ascii_case(category))
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::SettlementSheet;
    use crate::catalog::RateCard;
    use crate::error::DomainError;
    use crate::models::booking::{BookingRequest, GeoPoint, PaymentMode};
    use crate::models::job::{ActiveJob, JobStatus};

    fn sheet(scrap_type: &str) -> SettlementSheet {
        let job = ActiveJob {
            booking: BookingRequest {
                id: "7".to_string(),
                scrap_type: scrap_type.to_string(),
                distance: "2 km".to_string(),
                customer_name: "Test".to_string(),
                customer_phone: "000".to_string(),
                address: "Somewhere".to_string(),
                payment_mode: PaymentMode::Upi,
                estimated_amount: 100.0,
                created_at: Utc::now(),
                priority: None,
                estimated_time: None,
            },
            status: JobStatus::ReadyForSettlement,
            customer_location: GeoPoint { lat: 0.0, lng: 0.0 },
            accepted_at: Utc::now(),
        };
        SettlementSheet::open(job, RateCard::default()).unwrap()
    }

    fn small_card() -> RateCard {
        RateCard::new(vec![
            ("Paper".to_string(), 12.0),
            ("Plastic".to_string(), 18.0),
        ])
    }

    fn categories(sheet: &SettlementSheet) -> Vec<String> {
        sheet
            .items()
            .iter()
            .map(|item| item.category.clone())
            .collect()
    }

    #[test]
    fn total_is_weight_times_rate() {
        let mut sheet = sheet("Paper");
        sheet.add_line_item("Plastic").unwrap();
        sheet.set_weight(0, 5.0).unwrap();
        sheet.set_weight(1, 2.0).unwrap();

        assert_eq!(sheet.compute_total(), 96.0);
        assert_eq!(sheet.compute_total(), sheet.compute_total());
    }

    #[test]
    fn negative_weight_is_clamped_to_zero() {
        let mut sheet = sheet("Paper");

        assert_eq!(sheet.set_weight(0, -5.0).unwrap(), 0.0);
        assert_eq!(sheet.items()[0].weight, 0.0);
        assert_eq!(sheet.set_weight(0, f64::NAN).unwrap(), 0.0);
    }

    #[test]
    fn set_weight_rejects_bad_index() {
        let mut sheet = sheet("Paper");

        assert_eq!(
            sheet.set_weight(3, 1.0),
            Err(DomainError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn add_then_remove_restores_items() {
        let mut sheet = sheet("Paper");
        sheet.add_line_item("Iron").unwrap();
        let before = categories(&sheet);

        sheet.add_line_item("Copper").unwrap();
        let index = sheet
            .items()
            .iter()
            .position(|item| item.category == "Copper")
            .unwrap();
        sheet.remove_line_item(index).unwrap();

        assert_eq!(categories(&sheet), before);
    }

    #[test]
    fn last_item_cannot_be_removed() {
        let mut sheet = sheet("Copper");

        assert_eq!(
            sheet.remove_line_item(0),
            Err(DomainError::MinimumItemsViolation)
        );
        assert_eq!(categories(&sheet), vec!["Copper"]);
    }

    #[test]
    fn duplicate_category_is_already_present() {
        let mut sheet = sheet("Paper");

        assert_eq!(
            sheet.add_line_item("paper"),
            Err(DomainError::AlreadyPresent("Paper".to_string()))
        );
        assert_eq!(
            sheet.add_line_item("Gold"),
            Err(DomainError::UnknownCategory("Gold".to_string()))
        );
    }

    #[test]
    fn exhausted_rate_card_reports_no_categories_left() {
        let job = sheet("Paper").job().clone();
        let mut sheet = SettlementSheet::open(job, small_card()).unwrap();

        sheet.add_next_available().unwrap();

        assert_eq!(sheet.add_next_available().unwrap_err(), DomainError::NoCategoriesLeft);
        assert_eq!(sheet.add_line_item("Plastic"), Err(DomainError::NoCategoriesLeft));
        assert_eq!(categories(&sheet), vec!["Paper", "Plastic"]);
    }

    #[test]
    fn weight_overflowing_the_total_is_refused() {
        let mut sheet = sheet("Copper");
        sheet.set_weight(0, 4.0).unwrap();

        assert_eq!(sheet.set_weight(0, 1e307), Err(DomainError::AmountOverflow));
        assert_eq!(sheet.items()[0].weight, 4.0);
        assert_eq!(sheet.set_weight(0, f64::INFINITY), Err(DomainError::AmountOverflow));

        sheet.add_line_item("Brass").unwrap();
        sheet.set_weight(0, 4e305).unwrap();
        assert_eq!(sheet.set_weight(1, 5e305), Err(DomainError::AmountOverflow));
        assert!(sheet.compute_total().is_finite());
    }

    #[test]
    fn non_finite_total_cannot_be_finalized() {
        let mut sheet = sheet("Copper");
        sheet.items[0].weight = f64::MAX;

        let (sheet, err) = sheet.finalize().unwrap_err();

        assert_eq!(err, DomainError::AmountOverflow);
        assert_eq!(sheet.job().status, JobStatus::ReadyForSettlement);
    }

    #[test]
    fn zero_total_cannot_be_finalized() {
        let sheet = sheet("Paper");

        let (sheet, err) = sheet.finalize().unwrap_err();

        assert_eq!(err, DomainError::ZeroAmount);
        assert_eq!(sheet.job().status, JobStatus::ReadyForSettlement);
    }

    #[test]
    fn finalize_produces_settled_record() {
        let mut sheet = sheet("Paper");
        sheet.set_weight(0, 2.5).unwrap();

        let completed = sheet.finalize().unwrap();

        assert_eq!(completed.job.status, JobStatus::Settled);
        assert_eq!(completed.total_amount, 30.0);
        assert_eq!(completed.line_items.len(), 1);
    }
}
