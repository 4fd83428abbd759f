use crate::domain::profile::RiskProfile;
use std::fmt;

/// The catalog could not be loaded. Fatal at startup; the service must not serve requests
/// without a catalog.
#[derive(Debug, Clone)]
pub struct CatalogUnavailable {
    pub path: String,
    pub detail: String,
}

impl fmt::Display for CatalogUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog unavailable (path={}): {}", self.path, self.detail)
    }
}

impl std::error::Error for CatalogUnavailable {}

/// Request-level failures of the portfolio pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    NoSuitableInstruments { profile: RiskProfile },
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::NoSuitableInstruments { profile } => {
                write!(f, "No suitable funds found for profile '{profile}'")
            }
        }
    }
}

impl std::error::Error for PortfolioError {}
