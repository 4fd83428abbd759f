use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use fundwise_core::catalog::{Catalog, CatalogSummary};
use fundwise_core::domain::portfolio::PortfolioResponse;
use fundwise_core::domain::profile::{QuizInput, QuizRequest};
use fundwise_core::error::PortfolioError;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fundwise_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    // Serving without a catalog would answer every request with "no suitable funds".
    let catalog = match Catalog::load(settings.catalog_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "catalog load failed; refusing to start");
            return Err(e);
        }
    };

    let state = AppState { catalog };
    let app = router(state);

    let port = settings.port.unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/catalog", get(get_catalog_summary))
        .route("/generate_portfolio", post(generate_portfolio))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    catalog: Catalog,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

async fn get_catalog_summary(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(state.catalog.summary())
}

async fn generate_portfolio(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> ApiResult<PortfolioResponse> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_portfolio", %request_id);

    let quiz = QuizInput::from(&request);
    let result = span.in_scope(|| fundwise_core::engine::recommend(&state.catalog, &quiz));

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e @ PortfolioError::NoSuitableInstruments { .. }) => {
            tracing::warn!(%request_id, error = %e, "no portfolio produced");
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiError {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
