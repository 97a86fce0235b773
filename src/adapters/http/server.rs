//! JSON API Server - Price and Health Endpoints
//!
//! axum router exposing the decorated `FetchService`:
//! - `/v1/price?ticker=<id>` — price quote for one coin
//! - `/v1/health`            — upstream health
//! - `/metrics`              — Prometheus text format (when enabled)
//!
//! Every failure is answered with `400 {"error": "<message>"}`.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, instrument};

use super::types::{ErrorResponse, HealthResponse, PriceQuery, PriceResponse};
use crate::adapters::metrics::MetricsRegistry;
use crate::domain::{FetchError, RequestContext};
use crate::ports::FetchService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Fully decorated service.
    pub service: Arc<dyn FetchService>,
    /// Registry rendered by `/metrics`.
    pub metrics: Option<Arc<MetricsRegistry>>,
}

/// Errors a handler can answer with. All map to 400.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing required query parameter: ticker")]
    MissingTicker,
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Create the router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/v1/price", get(handle_fetch_price))
        .route("/v1/health", get(handle_api_health));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(handle_metrics));
    }

    router.with_state(state)
}

/// `GET /v1/price?ticker=<id>`
async fn handle_fetch_price(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let ticker = PriceQuery::from_pairs(pairs)
        .ticker
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingTicker)?;

    let ctx = RequestContext::new();
    let quote = state.service.fetch_price(&ctx, &ticker).await?;

    Ok(Json(quote.into()))
}

/// `GET /v1/health`
async fn handle_api_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let ctx = RequestContext::new();
    let health = state.service.check_health(&ctx).await?;

    Ok(Json(health.into()))
}

/// `GET /metrics`
async fn handle_metrics(State(state): State<AppState>) -> Response {
    let Some(registry) = state.metrics else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match registry.render() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// HTTP server for the JSON API.
pub struct ApiServer {
    /// Bind address (`host:port`).
    listen_addr: String,
    /// Handler state.
    state: AppState,
}

impl ApiServer {
    /// Create a new server around an already decorated service.
    pub fn new(listen_addr: impl Into<String>, service: Arc<dyn FetchService>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            state: AppState {
                service,
                metrics: None,
            },
        }
    }

    /// Also serve `/metrics` from this registry.
    #[must_use]
    pub fn with_metrics(mut self, registry: Arc<MetricsRegistry>) -> Self {
        self.state.metrics = Some(registry);
        self
    }

    /// The router this server would serve.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind and serve until `shutdown` resolves.
    #[instrument(skip(self, shutdown), fields(address = %self.listen_addr))]
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&self.listen_addr).await?;

        info!(address = %listener.local_addr()?, "JSON API server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("JSON API server stopped");
        Ok(())
    }
}
