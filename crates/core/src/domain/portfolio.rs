use crate::domain::instrument::{Instrument, RiskLabel};
use crate::domain::profile::RiskProfile;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Category-group weights of a profile template, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation(pub &'static [(&'static str, i32)]);

impl Allocation {
    pub fn get(&self, label: &str) -> Option<i32> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, p)| *p)
    }
}

impl Serialize for Allocation {
    // A map on the wire, but key order follows the template rather than sorting.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, percent) in self.0 {
            map.serialize_entry(label, percent)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedHolding<'a> {
    pub instrument: &'a Instrument,
    pub percent: i32,
}

/// Output of the allocation planner. Holdings borrow from the shared catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPlan<'a> {
    pub profile: RiskProfile,
    pub allocation: Allocation,
    pub holdings: Vec<PlannedHolding<'a>>,
}

impl PortfolioPlan<'_> {
    pub fn total_percent(&self) -> i32 {
        self.holdings.iter().map(|h| h.percent).sum()
    }
}

/// One recommended instrument as shown to the user. Internal metrics (ticker, volatility,
/// Sharpe ratio) are not carried over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedHolding {
    pub scheme_name: String,
    pub category: String,
    pub risk_label: RiskLabel,
    pub explanation: Vec<String>,
    pub percent: i32,
}

impl ExplainedHolding {
    pub fn new(instrument: &Instrument, percent: i32, explanation: Vec<String>) -> Self {
        Self {
            scheme_name: instrument.scheme_name.clone(),
            category: instrument.category.clone(),
            risk_label: instrument.risk_label,
            explanation,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioResponse {
    pub profile: RiskProfile,
    pub allocation: Allocation,
    pub schemes: Vec<ExplainedHolding>,
}
