use crate::domain::instrument::{Instrument, RiskLabel};
use crate::domain::profile::RiskProfile;
use std::cmp::Ordering;

/// Upper bound on the number of instruments in a shortlist.
pub const SHORTLIST_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Highest Sharpe ratio first.
    SharpeDesc,
    /// Lowest volatility first.
    VolatilityAsc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRule {
    pub accepted: &'static [RiskLabel],
    pub sort: SortKey,
}

impl ScreenRule {
    pub fn for_profile(profile: RiskProfile) -> Self {
        use RiskLabel::*;
        match profile {
            RiskProfile::Aggressive => ScreenRule {
                accepted: &[High, Medium],
                sort: SortKey::SharpeDesc,
            },
            RiskProfile::Moderate => ScreenRule {
                accepted: &[Medium, Low],
                sort: SortKey::SharpeDesc,
            },
            // Safety matters more than risk-adjusted return here.
            RiskProfile::Conservative => ScreenRule {
                accepted: &[Low, VeryLow],
                sort: SortKey::VolatilityAsc,
            },
            RiskProfile::VeryConservative => ScreenRule {
                accepted: &[VeryLow],
                sort: SortKey::VolatilityAsc,
            },
        }
    }

    fn compare(&self, a: &Instrument, b: &Instrument) -> Ordering {
        match self.sort {
            SortKey::SharpeDesc => b
                .sharpe_or_default()
                .partial_cmp(&a.sharpe_or_default())
                .unwrap_or(Ordering::Equal),
            SortKey::VolatilityAsc => a
                .volatility_or_default()
                .partial_cmp(&b.volatility_or_default())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Filters the catalog to the profile's accepted risk labels, orders the survivors, and keeps
/// at most [`SHORTLIST_LIMIT`]. Ties keep catalog order.
pub fn screen(catalog: &[Instrument], profile: RiskProfile) -> Vec<&Instrument> {
    let rule = ScreenRule::for_profile(profile);

    let mut shortlist: Vec<&Instrument> = catalog
        .iter()
        .filter(|i| rule.accepted.contains(&i.risk_label))
        .collect();

    // Stable sort keeps catalog order among equal keys.
    shortlist.sort_by(|a, b| rule.compare(a, b));
    shortlist.truncate(SHORTLIST_LIMIT);
    shortlist
}
