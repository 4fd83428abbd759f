use crate::domain::instrument::{category_matches, Instrument, RiskLabel};
use crate::domain::profile::RiskProfile;

/// Maximum number of reasons shown per instrument.
pub const MAX_REASONS: usize = 2;

pub const FD_SAFETY: &str = "Guaranteed Returns & Capital Safety (FD)";
pub const SGB_SAFETY: &str = "Government Backed + Gold Exposure (SGB)";
pub const LIQUID_SAFETY: &str = "Very Safe for Short Term Parking";
pub const GENERIC_SAFETY: &str = "Capital Protection with Minimal Volatility";
pub const GENERIC_REASON: &str = "A solid choice for diversification";

/// Every message a Very Low instrument can receive.
pub const SAFETY_MESSAGES: [&str; 4] = [FD_SAFETY, SGB_SAFETY, LIQUID_SAFETY, GENERIC_SAFETY];

const SAFETY_RULES: [(&str, &str); 3] = [
    ("Fixed Deposit", FD_SAFETY),
    ("Gold Bond", SGB_SAFETY),
    ("Liquid", LIQUID_SAFETY),
];

const CATEGORY_RULES: [(&str, &str); 4] = [
    ("Index Fund", "Low-cost & Diversified Market Exposure"),
    ("Gold", "Hedge against Inflation (Gold)"),
    ("Small-Cap", "High Growth Potential (Small Cap)"),
    ("Large-Cap", "Invests in Stable Large Companies"),
];

/// Produces one or two human-readable reasons for recommending `instrument` to a user with
/// `profile`. Very Low instruments only ever get safety messages.
pub fn explain(instrument: &Instrument, profile: RiskProfile) -> Vec<String> {
    if instrument.risk_label == RiskLabel::VeryLow {
        return safety_reasons(&instrument.category);
    }

    let mut reasons = Vec::new();

    let sharpe = instrument.sharpe_or_default();
    if sharpe > 1.2 {
        reasons.push(format!("Excellent Risk-Adjusted Return (Sharpe: {sharpe:.2})"));
    } else if sharpe > 0.8 {
        reasons.push(format!("Good Risk-Adjusted Return (Sharpe: {sharpe:.2})"));
    }

    if let Some(reason) = profile_match(instrument.risk_label, profile) {
        reasons.push(reason.to_string());
    }

    for (keyword, reason) in CATEGORY_RULES {
        if category_matches(&instrument.category, &[keyword]) {
            reasons.push(reason.to_string());
        }
    }

    if reasons.is_empty() {
        reasons.push(GENERIC_REASON.to_string());
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// First matching safety message, in FD, Gold Bond, Liquid order.
fn safety_reasons(category: &str) -> Vec<String> {
    let reason = SAFETY_RULES
        .iter()
        .find(|(keyword, _)| category_matches(category, &[*keyword]))
        .map_or(GENERIC_SAFETY, |(_, reason)| *reason);
    vec![reason.to_string()]
}

fn profile_match(label: RiskLabel, profile: RiskProfile) -> Option<&'static str> {
    match (label, profile) {
        (RiskLabel::Low, RiskProfile::Conservative | RiskProfile::Moderate) => {
            Some("Provides Stability & Lower Risk")
        }
        (RiskLabel::Medium, RiskProfile::Moderate) => Some("Matches your Balanced Profile"),
        (RiskLabel::High, RiskProfile::Aggressive) => Some("Matches your Aggressive Growth goal"),
        _ => None,
    }
}
