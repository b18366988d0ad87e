//! HTTP-level tests for the intake routes.

mod common;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;

use appraisal_intake::drive::{DriveError, RemoteEntry, RemoteObject};
use appraisal_intake::{RemoteDrive, RemoteFolder};

use common::{valid_form, MultipartBody, TestApp, MAX_FILE_BYTES, ROOT_ID};

/// Drive that refuses every call.
struct UnavailableDrive;

#[async_trait]
impl RemoteDrive for UnavailableDrive {
    async fn list(&self, _parent_id: &str) -> Result<Vec<RemoteEntry>, DriveError> {
        Err(unavailable("ls"))
    }

    async fn mkdir(&self, _name: &str, _parent_id: &str) -> Result<RemoteFolder, DriveError> {
        Err(unavailable("mkdir"))
    }

    async fn upload(&self, _path: &Path, _parent_id: &str) -> Result<RemoteObject, DriveError> {
        Err(unavailable("upload"))
    }

    async fn link(&self, _id: &str) -> Result<Option<String>, DriveError> {
        Err(unavailable("url"))
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

fn unavailable(subcommand: &str) -> DriveError {
    DriveError::CommandFailed {
        subcommand: subcommand.to_string(),
        message: "service unavailable".to_string(),
    }
}

// ============================================================================
// Successful submissions
// ============================================================================

#[tokio::test]
async fn test_create_case_returns_drive_locations() {
    let app = TestApp::new();

    let (status, body) = app.send_json(valid_form().photos(2).into_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let case_id = body["caseId"].as_str().expect("caseId is a string");
    assert_eq!(case_id.len(), 36);
    assert_eq!(body["next"]["confirmUrl"], format!("/case/{}", case_id));

    assert!(body["drive"]["root"]["id"].is_string());
    assert!(body["drive"]["root"]["link"]
        .as_str()
        .is_some_and(|link| link.starts_with("memory://")));
    assert!(body["drive"]["manifest"]["id"].is_string());
    assert_eq!(body["drive"]["taxDocument"]["name"], "iptu.pdf");
    assert_eq!(body["drive"]["photos"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_create_case_uploads_into_case_folder() {
    let app = TestApp::new();

    let (status, body) = app.send_json(valid_form().photos(3).into_request()).await;
    assert_eq!(status, StatusCode::OK);

    // Tax document, three photos and the manifest.
    assert_eq!(app.drive.upload_count(), 5);
    assert_eq!(app.drive.child_names(ROOT_ID), vec!["Appraisals"]);

    let case_root = body["drive"]["root"]["id"].as_str().expect("root id");
    assert_eq!(
        app.drive.child_names(case_root),
        vec!["input", "output", "logs"]
    );
}

#[tokio::test]
async fn test_create_case_without_photos() {
    let app = TestApp::new();

    let (status, body) = app.send_json(valid_form().into_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drive"]["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_blank_photo_part_is_ignored() {
    let app = TestApp::new();
    let form = valid_form().file("photos", "", "application/octet-stream", b"");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drive"]["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let app = TestApp::new();
    let form = valid_form().text("notes", "corner lot");

    let (status, _) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_scratch_copy_is_kept() {
    let app = TestApp::new();

    let (status, body) = app.send_json(valid_form().photos(1).into_request()).await;
    assert_eq!(status, StatusCode::OK);

    let case_dir = app.scratch_dir.join(body["caseId"].as_str().expect("caseId"));
    assert!(case_dir.join("case.json").is_file());
}

#[tokio::test]
async fn test_long_filename_is_accepted() {
    let app = TestApp::new();
    let long_name = format!("{}.pdf", "a".repeat(246));
    let form = MultipartBody::new()
        .text("property_type", "house")
        .file("tax_document", &long_name, "application/pdf", b"%PDF-1.7");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drive"]["taxDocument"]["name"], long_name.as_str());
    assert_eq!(app.drive.upload_count(), 2);
}

// ============================================================================
// Rejected submissions
// ============================================================================

#[tokio::test]
async fn test_missing_tax_document_is_rejected() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("property_type", "house")
        .photos(1);

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tax document is required");
    assert_eq!(app.drive.mkdir_count(), 0);
    assert_eq!(app.drive.upload_count(), 0);
}

#[tokio::test]
async fn test_empty_tax_document_is_rejected() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("property_type", "house")
        .file("tax_document", "iptu.pdf", "application/pdf", b"");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tax document is required");
}

#[tokio::test]
async fn test_tax_document_sent_as_text_is_rejected() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("property_type", "land")
        .text("tax_document", "iptu.pdf");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tax document is required");
}

#[tokio::test]
async fn test_too_many_photos_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.send_json(valid_form().photos(6).into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "at most 5 photos allowed, got 6");
    assert_eq!(app.drive.upload_count(), 0);
}

#[tokio::test]
async fn test_five_photos_is_accepted() {
    let app = TestApp::new();

    let (status, _) = app.send_json(valid_form().photos(5).into_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.drive.upload_count(), 7);
}

#[tokio::test]
async fn test_invalid_property_type_is_rejected() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("property_type", "castle")
        .file("tax_document", "iptu.pdf", "application/pdf", b"%PDF");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid property type");
}

#[tokio::test]
async fn test_missing_property_type_is_rejected() {
    let app = TestApp::new();
    let form = MultipartBody::new().file("tax_document", "iptu.pdf", "application/pdf", b"%PDF");

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid property type");
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = TestApp::new();
    let big = vec![0u8; MAX_FILE_BYTES as usize + 1];
    let form = valid_form().file("photos", "huge.jpg", "image/jpeg", &big);

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("huge.jpg")));
    assert_eq!(app.drive.upload_count(), 0);
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let app = TestApp::new();
    let photo = vec![0u8; MAX_FILE_BYTES as usize];
    let mut form = valid_form();
    for i in 0..300 {
        form = form.file("photos", &format!("photo-{}.jpg", i), "image/jpeg", &photo);
    }

    let (status, body) = app.send_json(form.into_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("too large")));
    assert_eq!(app.drive.mkdir_count(), 0);
    assert_eq!(app.drive.upload_count(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/case/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"property_type":"house"}"#))
        .expect("valid request");

    let (status, body) = app.send_json(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// ============================================================================
// Drive failures
// ============================================================================

#[tokio::test]
async fn test_drive_failure_is_internal_error() {
    let app = TestApp::with_drive(Arc::new(UnavailableDrive));

    let (status, body) = app.send_json(valid_form().into_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("service unavailable")));
}

// ============================================================================
// Static routes
// ============================================================================

#[tokio::test]
async fn test_index_serves_form() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("valid request");

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains(r#"name="tax_document""#));
    assert!(html.contains("/api/case/create"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("valid request");

    let (status, body) = app.send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_case_requires_post() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/case/create")
        .body(Body::empty())
        .expect("valid request");

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
