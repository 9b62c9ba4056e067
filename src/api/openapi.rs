//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the translation REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the translation REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Translation API",
        version = "0.1.0",
        description = "Upload PDFs, translate them in the background with BabelDOC, poll their status and download the result",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Tasks
        crate::api::routes::translate,
        crate::api::routes::get_status,
        crate::api::routes::download,
        crate::api::routes::list_tasks,
        crate::api::routes::delete_task,

        // System
        crate::api::routes::service_info,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::TaskId,
        crate::types::TaskStatus,
        crate::types::TaskRecord,
        crate::types::TaskInfo,
        crate::types::TaskList,
        crate::types::TranslateOptions,
        crate::types::TranslationResponse,

        // API request/response types from routes
        crate::api::routes::TranslateForm,
        crate::api::routes::MessageResponse,
        crate::api::routes::HealthResponse,
        crate::api::routes::ServiceInfo,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "tasks", description = "Translation tasks - Submit PDFs, poll status, download results, delete"),
        (name = "system", description = "System endpoints - Banner, health check, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
