use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundwise_core::catalog::Catalog;
use fundwise_core::domain::profile::{QuizInput, QuizRequest, RiskProfile};
use fundwise_core::error::{CatalogUnavailable, PortfolioError};

#[derive(Debug, Parser)]
#[command(name = "fundwise_cli")]
struct Args {
    /// Catalog JSON produced by the labeling job. Overrides CATALOG_PATH.
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate the catalog, then log a per-risk-label summary.
    Validate,

    /// Print the shortlist a profile would get, as JSON.
    Screen {
        /// Risk profile, e.g. "Aggressive" or "Very Conservative".
        #[arg(long, value_parser = parse_profile)]
        profile: RiskProfile,
    },

    /// Run the whole pipeline for a set of quiz answers and print the response JSON.
    Recommend {
        /// Reaction to a market drop (A/B/C).
        #[arg(long)]
        q1: Option<String>,

        /// Primary goal (A/B/C).
        #[arg(long)]
        q2: Option<String>,

        /// Investment horizon, e.g. "7+ Years".
        #[arg(long)]
        horizon: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fundwise_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let path = args
        .catalog
        .as_deref()
        .unwrap_or_else(|| settings.catalog_path());

    let catalog = match Catalog::load(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            if let Some(unavailable) = err.downcast_ref::<CatalogUnavailable>() {
                tracing::error!(path = %unavailable.path, detail = %unavailable.detail, "catalog unavailable");
            }
            return Err(err);
        }
    };

    match args.command {
        Command::Validate => {
            let summary = catalog.summary();
            for (label, count) in &summary.by_risk_label {
                tracing::info!(risk_label = %label, count, "catalog risk label");
            }
            tracing::info!(%path, instruments = summary.instruments, "catalog is valid");
        }
        Command::Screen { profile } => {
            let shortlist = fundwise_core::engine::screener::screen(catalog.instruments(), profile);
            tracing::info!(%profile, shortlist_len = shortlist.len(), "shortlist screened");
            println!(
                "{}",
                serde_json::to_string_pretty(&shortlist).context("serialize shortlist failed")?
            );
        }
        Command::Recommend { q1, q2, horizon } => {
            let request = QuizRequest {
                quiz_answer_1: q1,
                quiz_answer_2: q2,
                horizon,
            };
            println!("{}", run_recommend(&catalog, &request)?);
        }
    }

    Ok(())
}

/// Runs the pipeline and renders the response as pretty JSON. An empty shortlist is an error,
/// so the process exits non-zero.
fn run_recommend(catalog: &Catalog, request: &QuizRequest) -> anyhow::Result<String> {
    match fundwise_core::engine::recommend(catalog, &QuizInput::from(request)) {
        Ok(response) => {
            serde_json::to_string_pretty(&response).context("serialize response failed")
        }
        Err(err @ PortfolioError::NoSuitableInstruments { .. }) => {
            tracing::error!(error = %err, "no portfolio produced");
            Err(err.into())
        }
    }
}

fn parse_profile(s: &str) -> Result<RiskProfile, String> {
    RiskProfile::parse(s).ok_or_else(|| {
        format!(
            "unknown risk profile {s:?} (expected one of: {})",
            RiskProfile::ALL.map(|p| p.as_str()).join(", ")
        )
    })
}

fn init_sentry(settings: &fundwise_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundwise_core::domain::instrument::{Instrument, RiskLabel};

    #[test]
    fn profile_argument_accepts_any_case() {
        assert_eq!(parse_profile("aggressive"), Ok(RiskProfile::Aggressive));
        assert_eq!(
            parse_profile("Very Conservative"),
            Ok(RiskProfile::VeryConservative)
        );
        let err = parse_profile("yolo").unwrap_err();
        assert!(err.contains("Very Conservative"));
    }

    #[test]
    fn recommend_subcommand_parses_quiz_answers() {
        let args = Args::try_parse_from([
            "fundwise_cli",
            "--catalog",
            "data/schemes_master_list_v2.json",
            "recommend",
            "--q1",
            "C",
            "--q2",
            "B",
            "--horizon",
            "7+ Years",
        ])
        .unwrap();

        assert_eq!(args.catalog.as_deref(), Some("data/schemes_master_list_v2.json"));
        match args.command {
            Command::Recommend { q1, q2, horizon } => {
                assert_eq!(q1.as_deref(), Some("C"));
                assert_eq!(q2.as_deref(), Some("B"));
                assert_eq!(horizon.as_deref(), Some("7+ Years"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn quiz(q1: &str, q2: &str, horizon: &str) -> QuizRequest {
        QuizRequest {
            quiz_answer_1: Some(q1.to_string()),
            quiz_answer_2: Some(q2.to_string()),
            horizon: Some(horizon.to_string()),
        }
    }

    #[test]
    fn recommend_fails_when_profile_has_no_instruments() {
        let catalog = Catalog::new(
            ["Infosys", "Reliance Industries", "Nifty 50 Bees ETF"]
                .into_iter()
                .map(|name| Instrument {
                    scheme_name: name.to_string(),
                    category: "Large-Cap Stock".to_string(),
                    risk_label: RiskLabel::Medium,
                    volatility: Some(0.2),
                    sharpe_ratio: Some(0.9),
                    ticker: None,
                })
                .collect(),
        );

        let err = run_recommend(&catalog, &quiz("B", "A", "1-3 Years")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PortfolioError>(),
            Some(&PortfolioError::NoSuitableInstruments {
                profile: RiskProfile::VeryConservative
            })
        );
    }

    #[test]
    fn recommend_renders_response_json() {
        let catalog = Catalog::from_json_str(include_str!(
            "../../../data/schemes_master_list_v2.json"
        ))
        .unwrap();

        let out = run_recommend(&catalog, &quiz("C", "B", "7+ Years")).unwrap();
        let body: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(body["profile"], "Aggressive");
        assert_eq!(body["schemes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn screen_subcommand_rejects_unknown_profile() {
        assert!(Args::try_parse_from(["fundwise_cli", "screen", "--profile", "reckless"]).is_err());
    }
}
