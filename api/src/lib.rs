pub mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use file_store::FileStore;
use history_store::HistoryStore;
use prompt_gateway::GeminiService;
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::{
    core::{
        app_state::AppState,
        config::{AppConfig, ConfigError},
    },
    error_handler::{AppError, AppResult},
    routes::{
        ask::ask_question_route::ask_question,
        files::files_route::{create_file, delete_file, list_files, read_file, update_file},
        general_route::{test_api, video_id, welcome},
        history::history_route::{get_history_item, list_history, update_history_item},
    },
};

/// Initializes the stores, then serves the API until Ctrl+C.
pub async fn start(config: AppConfig) -> AppResult<()> {
    let state = build_state(&config).await?;

    let app = app_router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&config.api_address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.api_address, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Prepares persistence and the provider client from `config`.
pub async fn build_state(config: &AppConfig) -> AppResult<Arc<AppState>> {
    let history = HistoryStore::new(&config.database_file);
    history.initialize().await?;

    let files = FileStore::new(&config.files_dir);
    files.ensure_dir().await?;

    if !config.gateway.has_api_key() {
        warn!("GEMINI_API_KEY is not set; /api/ask will answer with a configuration error");
    }
    let gateway = GeminiService::new(config.gateway.clone())?;

    Ok(Arc::new(AppState::new(
        Arc::new(gateway),
        history,
        files,
        config.video_id.clone(),
    )))
}

/// All routes, without outer middleware.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/test", get(test_api))
        .route("/video_id", get(video_id))
        .route("/api/ask", post(ask_question))
        .route("/api/history", get(list_history))
        .route(
            "/api/history/{id}",
            get(get_history_item).put(update_history_item),
        )
        .route("/api/files", get(list_files).post(create_file))
        .route(
            "/api/files/{filename}",
            get(read_file).put(update_file).delete(delete_file),
        )
        .with_state(state)
}

/// CORS for the configured origins, with credentials.
///
/// Methods and headers mirror the request since wildcards cannot be combined
/// with credentials.
pub fn cors_layer(config: &AppConfig) -> Result<CorsLayer, ConfigError> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.origin_headers()?))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
