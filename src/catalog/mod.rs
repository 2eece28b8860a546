pub mod fixtures;

use serde::Serialize;

/// Scrap category metadata shown in the rate card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScrapCategory {
    pub name: &'static str,
    pub rate_per_kg: f64,
    pub color: &'static str,
}

pub const SCRAP_CATEGORIES: &[ScrapCategory] = &[
    ScrapCategory { name: "Paper", rate_per_kg: 12.0, color: "#8B5CF6" },
    ScrapCategory { name: "Cardboard", rate_per_kg: 8.0, color: "#A16207" },
    ScrapCategory { name: "Plastic", rate_per_kg: 18.0, color: "#3B82F6" },
    ScrapCategory { name: "Iron", rate_per_kg: 28.0, color: "#6B7280" },
    ScrapCategory { name: "Aluminium", rate_per_kg: 105.0, color: "#94A3B8" },
    ScrapCategory { name: "Brass", rate_per_kg: 305.0, color: "#CA8A04" },
    ScrapCategory { name: "Copper", rate_per_kg: 425.0, color: "#EA580C" },
    ScrapCategory { name: "E-Waste", rate_per_kg: 45.0, color: "#10B981" },
    ScrapCategory { name: "Glass", rate_per_kg: 2.0, color: "#06B6D4" },
];

/// Name and per-kg rate of every category a settlement sheet may contain.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    rates: Vec<(String, f64)>,
}

impl RateCard {
    pub fn new(rates: Vec<(String, f64)>) -> Self {
        Self { rates }
    }

    pub fn rate_for(&self, category: &str) -> Option<f64> {
        self.rates
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, rate)| *rate)
    }

    /// Canonical spelling of `category`, if the card knows it.
    pub fn canonical_name(&self, category: &str) -> Option<&str> {
        self.rates
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::new(
            SCRAP_CATEGORIES
                .iter()
                .map(|category| (category.name.to_string(), category.rate_per_kg))
                .collect(),
        )
    }
}
