//! REST API server module
//!
//! Exposes the translation task lifecycle over HTTP: upload a PDF, poll its
//! status, download the result, list and delete tasks.

use crate::{Result, TaskManager};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Tasks
/// - `POST /translate` - Upload a PDF (multipart `file`, `lang_out`, `no_dual`)
/// - `GET /status/:task_id` - Get task status
/// - `GET /download/:task_id` - Download the translated PDF
/// - `GET /tasks` - List all tasks
/// - `DELETE /tasks/:task_id` - Delete a task and its files
///
/// ## System
/// - `GET /` - Service banner
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
pub fn create_router(manager: TaskManager) -> Router {
    let state = AppState::new(manager);
    let config = state.config.clone();

    let router = Router::new()
        // Tasks
        .route("/translate", post(routes::translate))
        .route("/status/:task_id", get(routes::get_status))
        .route("/download/:task_id", get(routes::download))
        .route("/tasks", get(routes::list_tasks))
        .route("/tasks/:task_id", delete(routes::delete_task))
        // System
        .route("/", get(routes::service_info))
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config (outermost)
    if config.api.cors_enabled {
        router.layer(build_cors_layer(&config.api.cors_origins))
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` anywhere in the list (or an empty list) allows every origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until SIGINT or SIGTERM (Ctrl+C elsewhere), then stops accepting
/// connections and lets in-flight requests finish.
///
/// # Example
///
/// ```no_run
/// use pdf_translate_api::{Config, TaskManager, translator};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::from_env();
/// let translator = translator::from_config(&config.translator);
/// let manager = TaskManager::new(config, translator).await?;
///
/// // Start API server (blocks until shutdown)
/// pdf_translate_api::api::start_api_server(manager).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(manager: TaskManager) -> Result<()> {
    let bind_address = manager.config().api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    serve(listener, manager, crate::wait_for_signal()).await
}

/// Serve the API on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, manager: TaskManager, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr().map_err(crate::error::Error::Io)?;
    let app = create_router(manager);

    tracing::info!(address = %address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
