use serde::{Deserialize, Serialize};
use std::fmt;

/// Volatility assumed for an instrument the labeling job could not measure.
pub const DEFAULT_VOLATILITY: f64 = 1.0;

/// Sharpe ratio assumed for an instrument the labeling job could not measure.
pub const DEFAULT_SHARPE_RATIO: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 4] = [
        RiskLabel::VeryLow,
        RiskLabel::Low,
        RiskLabel::Medium,
        RiskLabel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::VeryLow => "Very Low",
            RiskLabel::Low => "Low",
            RiskLabel::Medium => "Medium",
            RiskLabel::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == s)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry. Built once when the catalog is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub scheme_name: String,
    pub category: String,
    pub risk_label: RiskLabel,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub ticker: Option<String>,
}

impl Instrument {
    pub fn volatility_or_default(&self) -> f64 {
        self.volatility.unwrap_or(DEFAULT_VOLATILITY)
    }

    pub fn sharpe_or_default(&self) -> f64 {
        self.sharpe_ratio.unwrap_or(DEFAULT_SHARPE_RATIO)
    }

    pub fn category_matches(&self, keywords: &[&str]) -> bool {
        category_matches(&self.category, keywords)
    }
}

/// Fuzzy asset-class match: case-sensitive substring search of any keyword in the free-text
/// category tag. Every category test in the pipeline goes through here.
pub fn category_matches(category: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| category.contains(keyword))
}
