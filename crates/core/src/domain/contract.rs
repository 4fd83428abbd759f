use crate::domain::instrument::{Instrument, RiskLabel};
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

/// One record of the catalog file written by the offline labeling job.
///
/// Extra keys the job leaves behind (`avg_return`, `has_market_data`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub scheme_name: String,
    pub category: String,
    pub risk_label: String,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub ticker: Option<String>,
}

impl CatalogRecord {
    pub fn validate_and_into_instrument(self) -> anyhow::Result<Instrument> {
        let scheme_name = self.scheme_name.trim().to_string();
        ensure!(!scheme_name.is_empty(), "scheme_name must be non-empty");

        let Some(risk_label) = RiskLabel::parse(self.risk_label.trim()) else {
            bail!(
                "unknown risk_label {:?} for scheme {scheme_name:?}",
                self.risk_label
            );
        };

        if let Some(v) = self.volatility {
            ensure!(
                v.is_finite() && v >= 0.0,
                "volatility must be a non-negative number for scheme {scheme_name:?} (got {v})"
            );
        }

        if let Some(s) = self.sharpe_ratio {
            ensure!(
                s.is_finite(),
                "sharpe_ratio must be finite for scheme {scheme_name:?} (got {s})"
            );
        }

        let ticker = self
            .ticker
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Instrument {
            scheme_name,
            // Category is matched by substring; keep it verbatim.
            category: self.category,
            risk_label,
            volatility: self.volatility,
            sharpe_ratio: self.sharpe_ratio,
            ticker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> CatalogRecord {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn accepts_labeling_job_output_with_extra_keys() {
        let instrument = record(json!({
            "scheme_name": " Sovereign Gold Bond (SGB) ",
            "category": "Gold Bond",
            "ticker": "SGB",
            "avg_return": 0.08,
            "volatility": 0.13,
            "sharpe_ratio": 0.5,
            "risk_label": "Very Low",
        }))
        .validate_and_into_instrument()
        .unwrap();

        assert_eq!(instrument.scheme_name, "Sovereign Gold Bond (SGB)");
        assert_eq!(instrument.risk_label, RiskLabel::VeryLow);
        assert_eq!(instrument.ticker.as_deref(), Some("SGB"));
    }

    #[test]
    fn metrics_are_optional() {
        let instrument = record(json!({
            "scheme_name": "Bank Fixed Deposit (1 Year)",
            "category": "Fixed Deposit",
            "risk_label": "Very Low",
        }))
        .validate_and_into_instrument()
        .unwrap();
        assert_eq!(instrument.volatility, None);
        assert_eq!(instrument.sharpe_ratio, None);
        assert_eq!(instrument.ticker, None);
    }

    #[test]
    fn rejects_unknown_risk_label() {
        let err = record(json!({
            "scheme_name": "Mystery Fund",
            "category": "Hybrid Fund",
            "risk_label": "Extreme",
        }))
        .validate_and_into_instrument()
        .unwrap_err();
        assert!(err.to_string().contains("unknown risk_label"));
    }

    #[test]
    fn rejects_negative_volatility_and_blank_name() {
        assert!(record(json!({
            "scheme_name": "Infosys",
            "category": "IT Stock",
            "risk_label": "Medium",
            "volatility": -0.2,
        }))
        .validate_and_into_instrument()
        .is_err());

        assert!(record(json!({
            "scheme_name": "   ",
            "category": "IT Stock",
            "risk_label": "Medium",
        }))
        .validate_and_into_instrument()
        .is_err());
    }
}
