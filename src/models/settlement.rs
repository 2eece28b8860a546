use serde::{Deserialize, Serialize};

/// One weighed scrap category on a settlement sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapLineItem {
    pub category: String,
    pub rate_per_kg: f64,
    pub weight: f64,
}

impl ScrapLineItem {
    pub fn new(category: impl Into<String>, rate_per_kg: f64) -> Self {
        Self {
            category: category.into(),
            rate_per_kg,
            weight: 0.0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.weight * self.rate_per_kg
    }
}
