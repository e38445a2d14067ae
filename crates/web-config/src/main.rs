use anyhow::Result;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use okitakoy_common::{
    Error as CommonError, ErrorResponse, HealthResponse, HealthStatus, ModelDescriptor,
    VersionInfo,
};
use okitakoy_config::{ClientConfig, ConfigLoader, ConfigProvider, ModelCatalog, RuntimeEnvironment};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
struct AppState {
    config: Arc<ClientConfig>,
    /// Pre-rendered `config.js` body
    script: Arc<str>,
    start_time: Instant,
}

impl AppState {
    fn new(config: ClientConfig) -> okitakoy_common::Result<Self> {
        let script = config.to_script()?;
        Ok(Self {
            config: Arc::new(config),
            script: script.into(),
            start_time: Instant::now(),
        })
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        models: state.config.models().len(),
    })
}

async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: VERSION.to_string(),
        api: "Okitakoy Web Config".to_string(),
    })
}

async fn get_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig::clone(&state.config))
}

async fn get_models(State(state): State<AppState>) -> Json<ModelCatalog> {
    Json(state.config.models().clone())
}

async fn get_model(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ModelDescriptor>, (StatusCode, Json<ErrorResponse>)> {
    match state.config.get_model(&key) {
        Some(model) => Ok(Json(model.clone())),
        None => {
            debug!(model = %key, "Unknown model requested");
            let err = CommonError::ModelNotFound(key);
            Err((StatusCode::NOT_FOUND, Json(ErrorResponse::from(&err))))
        }
    }
}

async fn config_script(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        state.script.to_string(),
    )
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(get_config))
        .route("/api/models", get(get_models))
        .route("/api/models/{key}", get(get_model))
        .route("/static/js/config.js", get(config_script))
        .route("/config.js", get(config_script))
        .route("/healthz", get(health_check))
        .route("/health", get(health_check))
        .route("/version", get(version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting Okitakoy web-config server");

    // Load configuration
    let app_config = ConfigLoader::load(None)?;
    let env = RuntimeEnvironment::from_app_config(&app_config)?;
    let client_config = ConfigProvider::init(&env);

    info!(
        api_url = %client_config.api_url(),
        models = client_config.models().len(),
        "Publishing client configuration"
    );

    let state = AppState::new(client_config.clone())?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((
        app_config.server.host.as_str(),
        app_config.server.port,
    ))
    .await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
