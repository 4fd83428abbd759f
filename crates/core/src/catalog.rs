use crate::domain::contract::CatalogRecord;
use crate::domain::instrument::{Instrument, RiskLabel};
use crate::error::CatalogUnavailable;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Read-only instrument catalog, loaded once at startup.
///
/// Cloning is cheap and shares the same instruments, so a single catalog can back any number
/// of concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    instruments: Vec<Instrument>,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub instruments: usize,
    pub loaded_at: DateTime<Utc>,
    pub by_risk_label: BTreeMap<&'static str, usize>,
}

impl Catalog {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                instruments,
                loaded_at: Utc::now(),
            }),
        }
    }

    /// Loads and validates the catalog file. Any failure is reported as [`CatalogUnavailable`].
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let result = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
            .and_then(|text| Self::from_json_str(&text));

        match result {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    instruments = catalog.len(),
                    "catalog loaded"
                );
                Ok(catalog)
            }
            Err(err) => Err(anyhow::Error::new(CatalogUnavailable {
                path: path.display().to_string(),
                detail: format!("{err:#}"),
            })),
        }
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let records = serde_json::from_str::<Vec<CatalogRecord>>(text)
            .context("catalog is not a JSON array of scheme records")?;
        anyhow::ensure!(!records.is_empty(), "catalog contains no schemes");

        let mut instruments = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let instrument = record
                .validate_and_into_instrument()
                .with_context(|| format!("invalid catalog record at index {idx}"))?;
            instruments.push(instrument);
        }

        Ok(Self::new(instruments))
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.inner.instruments
    }

    pub fn len(&self) -> usize {
        self.inner.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.instruments.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.inner.loaded_at
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut by_risk_label: BTreeMap<&'static str, usize> =
            RiskLabel::ALL.iter().map(|l| (l.as_str(), 0)).collect();
        for instrument in self.instruments() {
            *by_risk_label.entry(instrument.risk_label.as_str()).or_default() += 1;
        }

        CatalogSummary {
            instruments: self.len(),
            loaded_at: self.loaded_at(),
            by_risk_label,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_CATALOG: &str =
        include_str!("../../../data/schemes_master_list_v2.json");

    pub(crate) fn sample_catalog() -> Catalog {
        Catalog::from_json_str(SAMPLE_CATALOG).unwrap()
    }

    #[test]
    fn sample_catalog_parses() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 12);

        let summary = catalog.summary();
        assert_eq!(summary.instruments, 12);
        assert_eq!(summary.by_risk_label["Very Low"], 4);
        assert_eq!(summary.by_risk_label["Low"], 1);
        assert_eq!(summary.by_risk_label["Medium"], 4);
        assert_eq!(summary.by_risk_label["High"], 3);
    }

    #[test]
    fn clones_share_instruments() {
        let a = sample_catalog();
        let b = a.clone();
        assert!(std::ptr::eq(a.instruments(), b.instruments()));
    }

    #[test]
    fn rejects_empty_or_malformed_catalog() {
        assert!(Catalog::from_json_str("[]").is_err());
        assert!(Catalog::from_json_str("{\"schemes\": []}").is_err());

        let err = Catalog::from_json_str(
            r#"[{"scheme_name": "X", "category": "Y", "risk_label": "Huge"}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("index 0"));
    }

    #[test]
    fn missing_file_is_catalog_unavailable() {
        let err = Catalog::load("/definitely/not/here/schemes.json").unwrap_err();
        let unavailable = err
            .downcast_ref::<CatalogUnavailable>()
            .expect("CatalogUnavailable");
        assert_eq!(unavailable.path, "/definitely/not/here/schemes.json");
        assert!(unavailable.detail.contains("failed to read"));
    }
}
