use crate::domain::instrument::{Instrument, RiskLabel};
use crate::domain::portfolio::{Allocation, PlannedHolding, PortfolioPlan};
use crate::domain::profile::RiskProfile;
use crate::error::PortfolioError;

/// Where a slot looks for its instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// The shortlist of the profile being planned.
    Shortlist,
    /// The shortlist another profile would get from the same catalog.
    ScreenedAs(RiskProfile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSlot {
    pub keywords: &'static [&'static str],
    pub accepted: &'static [RiskLabel],
    pub percent: i32,
    pub source: CandidateSource,
    /// Index of an earlier slot whose pick must not be chosen again.
    pub exclude_pick_of: Option<usize>,
}

impl AllocationSlot {
    const fn own(
        keywords: &'static [&'static str],
        accepted: &'static [RiskLabel],
        percent: i32,
    ) -> Self {
        Self {
            keywords,
            accepted,
            percent,
            source: CandidateSource::Shortlist,
            exclude_pick_of: None,
        }
    }

    const fn screened_as(self, profile: RiskProfile) -> Self {
        Self {
            source: CandidateSource::ScreenedAs(profile),
            ..self
        }
    }

    const fn excluding_pick_of(self, slot: usize) -> Self {
        Self {
            exclude_pick_of: Some(slot),
            ..self
        }
    }

    fn accepts(&self, instrument: &Instrument) -> bool {
        instrument.category_matches(self.keywords) && self.accepted.contains(&instrument.risk_label)
    }

    /// First candidate matching both keywords and risk label, else the first candidate.
    ///
    /// The fallback ignores category and risk label entirely, so a High-risk slot can end up
    /// holding a Very Low instrument. Kept as-is pending product review.
    pub fn select<'a>(&self, candidates: &[&'a Instrument]) -> Option<&'a Instrument> {
        if let Some(hit) = candidates.iter().copied().find(|i| self.accepts(i)) {
            return Some(hit);
        }

        let fallback = candidates.first().copied();
        if let Some(i) = fallback {
            tracing::debug!(
                keywords = ?self.keywords,
                scheme = %i.scheme_name,
                "no keyword match for slot; falling back to top candidate"
            );
        }
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationTemplate {
    pub allocation: Allocation,
    pub slots: &'static [AllocationSlot],
}

static AGGRESSIVE: AllocationTemplate = AllocationTemplate {
    allocation: Allocation(&[
        ("High Risk Equity/Stock", 60),
        ("Medium Risk Equity/Index", 20),
        ("Gold/Debt", 20),
    ]),
    slots: &[
        AllocationSlot::own(&["Stock", "Small-Cap", "Mid-Cap"], &[RiskLabel::High], 30),
        AllocationSlot::own(
            &["Flexi-Cap", "Large-Cap"],
            &[RiskLabel::High, RiskLabel::Medium],
            30,
        )
        .excluding_pick_of(0),
        AllocationSlot::own(&["Index Fund"], &[RiskLabel::Medium], 20),
        AllocationSlot::own(&["Gold", "Liquid"], &[RiskLabel::Low, RiskLabel::VeryLow], 20)
            .screened_as(RiskProfile::Conservative),
    ],
};

static MODERATE: AllocationTemplate = AllocationTemplate {
    allocation: Allocation(&[
        ("Medium Risk Equity/Index", 40),
        ("Low Risk Debt/Gold", 40),
        ("Very Low Risk FD/Liquid", 20),
    ]),
    slots: &[
        AllocationSlot::own(
            &["Index Fund", "Large-Cap", "Flexi-Cap"],
            &[RiskLabel::Medium],
            40,
        ),
        AllocationSlot::own(&["Gold", "Short-Term Debt"], &[RiskLabel::Low], 40),
        AllocationSlot::own(&["Fixed Deposit", "Liquid"], &[RiskLabel::VeryLow], 20)
            .screened_as(RiskProfile::VeryConservative),
    ],
};

static CONSERVATIVE: AllocationTemplate = AllocationTemplate {
    allocation: Allocation(&[("Low Risk Gold/Debt", 50), ("Very Low Risk FD/Liquid", 50)]),
    slots: &[
        AllocationSlot::own(&["Gold", "Debt"], &[RiskLabel::Low], 50),
        AllocationSlot::own(&["Fixed Deposit", "Liquid", "SGB"], &[RiskLabel::VeryLow], 50),
    ],
};

static VERY_CONSERVATIVE: AllocationTemplate = AllocationTemplate {
    allocation: Allocation(&[("Fixed Deposit / SGB", 70), ("Liquid Fund", 30)]),
    slots: &[
        AllocationSlot::own(&["Fixed Deposit", "SGB"], &[RiskLabel::VeryLow], 70),
        AllocationSlot::own(&["Liquid"], &[RiskLabel::VeryLow], 30).excluding_pick_of(0),
    ],
};

impl AllocationTemplate {
    pub fn for_profile(profile: RiskProfile) -> &'static AllocationTemplate {
        match profile {
            RiskProfile::Aggressive => &AGGRESSIVE,
            RiskProfile::Moderate => &MODERATE,
            RiskProfile::Conservative => &CONSERVATIVE,
            RiskProfile::VeryConservative => &VERY_CONSERVATIVE,
        }
    }
}

/// Builds the allocation plan for `profile`.
///
/// `screen_as` returns the shortlist another profile would get from the same catalog; it is
/// only called for slots that draw from a different profile's candidates. Slots that find
/// nothing are dropped and the remaining percentages are rescaled to sum to 100.
pub fn plan<'a, F>(
    profile: RiskProfile,
    shortlist: &[&'a Instrument],
    screen_as: F,
) -> Result<PortfolioPlan<'a>, PortfolioError>
where
    F: Fn(RiskProfile) -> Vec<&'a Instrument>,
{
    if shortlist.is_empty() {
        return Err(PortfolioError::NoSuitableInstruments { profile });
    }

    let template = AllocationTemplate::for_profile(profile);
    let mut picks: Vec<Option<&'a Instrument>> = Vec::with_capacity(template.slots.len());
    let mut holdings: Vec<PlannedHolding<'a>> = Vec::with_capacity(template.slots.len());

    for (idx, slot) in template.slots.iter().enumerate() {
        let mut candidates: Vec<&'a Instrument> = match slot.source {
            CandidateSource::Shortlist => shortlist.to_vec(),
            CandidateSource::ScreenedAs(other) => screen_as(other),
        };

        // Identity, not equality: two catalog entries with identical fields are distinct.
        if let Some(Some(taken)) = slot.exclude_pick_of.and_then(|i| picks.get(i)) {
            candidates.retain(|c| !std::ptr::eq(*c, *taken));
        }

        let pick = slot.select(&candidates);
        match pick {
            Some(instrument) => holdings.push(PlannedHolding {
                instrument,
                percent: slot.percent,
            }),
            None => tracing::warn!(%profile, slot = idx, "no candidates for slot; omitting"),
        }
        picks.push(pick);
    }

    if holdings.is_empty() {
        return Err(PortfolioError::NoSuitableInstruments { profile });
    }

    let mut percents: Vec<i32> = holdings.iter().map(|h| h.percent).collect();
    normalize_percents(&mut percents);
    for (holding, percent) in holdings.iter_mut().zip(percents) {
        holding.percent = percent;
    }

    Ok(PortfolioPlan {
        profile,
        allocation: template.allocation,
        holdings,
    })
}

/// Rescales percentages to sum to 100 when slots were dropped.
///
/// Each value becomes `round(p / total * 100)` (ties to even); any rounding residual is added
/// to the first entry. An empty slice is left as-is.
pub fn normalize_percents(percents: &mut [i32]) {
    let total: i32 = percents.iter().sum();
    if total > 0 && total != 100 {
        tracing::warn!(total, "adjusting allocation percentages to 100");
        for p in percents.iter_mut() {
            *p = ((*p as f64 / total as f64) * 100.0).round_ties_even() as i32;
        }
    }

    let sum: i32 = percents.iter().sum();
    if sum != 100 {
        if let Some(first) = percents.first_mut() {
            *first += 100 - sum;
        }
    }
}
