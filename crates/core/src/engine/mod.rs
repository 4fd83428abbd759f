pub mod classifier;
pub mod explainer;
pub mod planner;
pub mod screener;

use crate::catalog::Catalog;
use crate::domain::portfolio::{ExplainedHolding, PortfolioResponse};
use crate::domain::profile::QuizInput;
use crate::error::PortfolioError;

/// Runs the full pipeline for one request: classify, screen, plan, explain.
///
/// Reads the catalog only; nothing here outlives the call.
pub fn recommend(catalog: &Catalog, quiz: &QuizInput) -> Result<PortfolioResponse, PortfolioError> {
    let instruments = catalog.instruments();

    let profile = classifier::classify(quiz);
    tracing::info!(%profile, "risk profile derived");

    let shortlist = screener::screen(instruments, profile);
    tracing::info!(%profile, shortlist_len = shortlist.len(), "shortlist screened");

    let plan = planner::plan(profile, &shortlist, |other| screener::screen(instruments, other))?;
    tracing::info!(
        %profile,
        holdings = plan.holdings.len(),
        total_percent = plan.total_percent(),
        "portfolio planned"
    );

    let schemes = plan
        .holdings
        .iter()
        .map(|holding| {
            let explanation = explainer::explain(holding.instrument, profile);
            tracing::debug!(
                scheme = %holding.instrument.scheme_name,
                percent = holding.percent,
                reasons = explanation.len(),
                "holding explained"
            );
            ExplainedHolding::new(holding.instrument, holding.percent, explanation)
        })
        .collect();

    Ok(PortfolioResponse {
        profile,
        allocation: plan.allocation,
        schemes,
    })
}
