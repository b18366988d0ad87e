//! Shared helpers for HTTP-level tests: an app wired to an in-memory
//! drive and a small multipart body builder.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use appraisal_intake::{InMemoryDrive, IntakePipeline, RemoteDrive, ScratchStorage};
use appraisal_intake_server::{router, AppState};

pub const ROOT_ID: &str = "root-folder";
pub const MAX_FILE_BYTES: u64 = 4096;

pub struct TestApp {
    _temp_dir: TempDir,
    pub scratch_dir: PathBuf,
    pub drive: Arc<InMemoryDrive>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let drive = Arc::new(InMemoryDrive::new());
        Self::build(drive.clone(), drive)
    }

    /// Routes uploads through `drive`; the in-memory `drive` field stays
    /// empty.
    pub fn with_drive(drive: Arc<dyn RemoteDrive>) -> Self {
        Self::build(drive, Arc::new(InMemoryDrive::new()))
    }

    fn build(remote: Arc<dyn RemoteDrive>, drive: Arc<InMemoryDrive>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let scratch_dir = temp_dir.path().join("scratch");
        let pipeline = IntakePipeline::new(
            remote,
            ScratchStorage::new(&scratch_dir),
            ROOT_ID,
            vec!["Appraisals".to_string(), "Comparative".to_string()],
        );

        Self {
            _temp_dir: temp_dir,
            scratch_dir,
            drive,
            router: router(AppState::new(pipeline, MAX_FILE_BYTES)),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).expect("response is JSON");
        (status, json)
    }
}

/// Builds a `multipart/form-data` request body part by part.
pub struct MultipartBody {
    boundary: &'static str,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----intake-test-boundary-7MA4YWxkTrZu0gW",
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, filename, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn photos(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.file(
                "photos",
                &format!("photo-{}.jpg", i + 1),
                "image/jpeg",
                &[0xFF, 0xD8, 0xFF, i as u8],
            );
        }
        self
    }

    pub fn into_request(mut self) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Request::builder()
            .method("POST")
            .uri("/api/case/create")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.buf))
            .expect("valid request")
    }
}

/// A form that passes validation.
pub fn valid_form() -> MultipartBody {
    MultipartBody::new()
        .text("property_type", "apartment")
        .file("tax_document", "iptu.pdf", "application/pdf", b"%PDF-1.7 tax")
}
