//! Translation task handlers.

use super::{MessageResponse, TranslateForm, parse_task_id};
use crate::api::AppState;
use crate::api::error_response::from_multipart;
use crate::config::parse_bool;
use crate::error::{Error, Result, TaskError};
use crate::types::{TaskInfo, TaskList, TranslateOptions, TranslationResponse};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use tokio_util::io::ReaderStream;

/// POST /translate - Upload a PDF and start translating it
#[utoipa::path(
    post,
    path = "/translate",
    tag = "tasks",
    request_body(content = TranslateForm, description = "PDF upload with translation options", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Task accepted", body = TranslationResponse),
        (status = 400, description = "Not a PDF, missing file or malformed form", body = crate::error::ApiError),
        (status = 413, description = "Upload larger than the configured limit", body = crate::error::ApiError),
        (status = 500, description = "Upload could not be stored", body = crate::error::ApiError)
    )
)]
pub async fn translate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranslationResponse>> {
    let limit = state.config.api.max_upload_bytes;
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut lang_out: Option<String> = None;
    let mut no_dual = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| from_multipart(e, limit))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| from_multipart(e, limit))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "lang_out" => {
                let value = field.text().await.map_err(|e| from_multipart(e, limit))?;
                lang_out = Some(value);
            }
            "no_dual" => {
                let value = field.text().await.map_err(|e| from_multipart(e, limit))?;
                no_dual = parse_bool(&value).ok_or_else(|| {
                    Error::Validation(format!("no_dual must be a boolean, got '{}'", value))
                })?;
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    let Some((file_name, content)) = upload else {
        return Err(Error::Validation(
            "no file provided in 'file' field".to_string(),
        ));
    };

    let options = TranslateOptions {
        lang_out: lang_out.unwrap_or_else(|| state.config.tasks.default_lang_out.clone()),
        no_dual,
    };

    let response = state.manager.submit(&file_name, &content, options).await?;
    Ok(Json(response))
}

/// GET /status/:task_id - Get one task's status
#[utoipa::path(
    get,
    path = "/status/{task_id}",
    tag = "tasks",
    params(
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task status", body = TaskInfo),
        (status = 404, description = "Task not found", body = crate::error::ApiError)
    )
)]
pub async fn get_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskInfo>> {
    let id = parse_task_id(&task_id)?;
    Ok(Json(state.manager.status(id).await?))
}

/// GET /download/:task_id - Download the translated PDF
#[utoipa::path(
    get,
    path = "/download/{task_id}",
    tag = "tasks",
    params(
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Translated PDF", body = [u8], content_type = "application/pdf"),
        (status = 400, description = "Translation not completed", body = crate::error::ApiError),
        (status = 404, description = "Task or translated file not found", body = crate::error::ApiError)
    )
)]
pub async fn download(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response> {
    let id = parse_task_id(&task_id)?;
    let path = state.manager.download(id).await?;

    // The file can still disappear between the existence check and the open
    let file = tokio::fs::File::open(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::Task(TaskError::ArtifactMissing {
            id: id.to_string(),
            path: Some(path.clone()),
        }),
        _ => Error::Io(e),
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("translation.pdf");

    tracing::debug!(task_id = %id, path = ?path, "serving translated file");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(file_name)),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

/// GET /tasks - List every live task
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "Snapshot of all tasks keyed by id", body = TaskList)
    )
)]
pub async fn list_tasks(State(state): State<AppState>) -> Json<TaskList> {
    Json(state.manager.list().await)
}

/// DELETE /tasks/:task_id - Delete a task and its files
///
/// Always succeeds; deleting an unknown task reports that it is already gone.
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    tag = "tasks",
    params(
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted or already absent", body = MessageResponse)
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    let removed = match parse_task_id(&task_id) {
        Ok(id) => state.manager.delete(id).await,
        Err(_) => false,
    };

    Json(MessageResponse::new(if removed {
        "task deleted"
    } else {
        "task already deleted"
    }))
}

/// `attachment` disposition with an ASCII fallback name plus the exact
/// UTF-8 name for clients that understand `filename*`
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if fallback == file_name {
        format!("attachment; filename=\"{}\"", file_name)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(file_name)
        )
    }
}
