use super::*;
use crate::tasks::test_helpers::{
    GatedTranslator, PdfWritingTranslator, test_config, test_manager, wait_until_terminal,
};
use crate::translator::Translator;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt; // for oneshot()


const BOUNDARY: &str = "----WebKitFormBoundary7MA4YWxkTrZu0gW";

/// Router over a fresh task manager rooted in a temporary directory
async fn test_app(translator: Arc<dyn Translator>) -> (Router, TaskManager, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let manager = test_manager(temp_dir.path(), translator).await;
    (create_router(manager.clone()), manager, temp_dir)
}

/// Hand-built multipart body: an optional file part followed by text fields
fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/pdf\r\n\
                 \r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\
                 \r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn translate_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/translate")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response should be valid JSON")
}

/// Submit `report.pdf` through the router and return the new task id
async fn submit_report(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(translate_request(multipart_body(
            Some(("report.pdf", b"%PDF-1.4 source".as_slice())),
            &[("lang_out", "ko")],
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["task_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn cors_headers_present_when_enabled() {
    let (app, _manager, _temp_dir) = test_app(Arc::new(PdfWritingTranslator)).await;

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn cors_headers_absent_when_disabled() {
    let temp_dir = tempdir().unwrap();
    let mut config = test_config(temp_dir.path(), Duration::from_secs(3600));
    config.api.cors_enabled = false;
    let manager = TaskManager::new(config, Arc::new(PdfWritingTranslator))
        .await
        .unwrap();
    let app = create_router(manager);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn cors_specific_origin_is_echoed() {
    let temp_dir = tempdir().unwrap();
    let mut config = test_config(temp_dir.path(), Duration::from_secs(3600));
    config.api.cors_origins = vec!["http://app.example".to_string()];
    let manager = TaskManager::new(config, Arc::new(PdfWritingTranslator))
        .await
        .unwrap();
    let app = create_router(manager);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://app.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://app.example"
    );
}

#[tokio::test]
async fn swagger_ui_is_mounted_when_enabled() {
    let temp_dir = tempdir().unwrap();
    let mut config = test_config(temp_dir.path(), Duration::from_secs(3600));
    config.api.swagger_ui = true;
    let manager = TaskManager::new(config, Arc::new(PdfWritingTranslator))
        .await
        .unwrap();
    let app = create_router(manager);

    let response = app
        .clone()
        .oneshot(get_request("/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Our own spec route still answers alongside the Swagger UI one
    let response = app.oneshot(get_request("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn serve_answers_over_tcp_and_shuts_down() {
    let temp_dir = tempdir().unwrap();
    let manager = test_manager(temp_dir.path(), Arc::new(PdfWritingTranslator)).await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve(listener, manager, async move {
        stop_rx.await.ok();
    }));

    let mut stream = tokio::net::TcpStream::connect(address).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    assert!(raw.contains("\"healthy\""));

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let (app, manager, _temp_dir) = test_app(Arc::new(PdfWritingTranslator)).await;

    let task_id = submit_report(&app).await;
    wait_until_terminal(&manager, task_id.parse().unwrap()).await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/status/{task_id}")))
        .await
        .unwrap();
    let status = body_json(response).await;
    assert_eq!(status["status"], "completed");
    let download_url = status["download_url"].as_str().unwrap().to_string();

    let response = app.clone().oneshot(get_request(&download_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete_request(&format!("/tasks/{task_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["message"], "task deleted");

    let response = app
        .oneshot(get_request(&format!("/status/{task_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_processing_while_translator_runs() {
    let gate = Arc::new(GatedTranslator::new());
    let (app, _manager, _temp_dir) = test_app(gate.clone()).await;

    let task_id = submit_report(&app).await;
    gate.wait_started().await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/status/{task_id}")))
        .await
        .unwrap();
    let status = body_json(response).await;
    assert_eq!(status["status"], "processing");
    assert_eq!(status["message"], "translating...");
    assert!(status["download_url"].is_null());

    let response = app
        .oneshot(get_request(&format!("/download/{task_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["message"], "translation not completed");

    gate.release();
}
