//! Test harness for isolated pipeline execution.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use appraisal_intake::drive::{RemoteEntry, RemoteObject};
use appraisal_intake::{
    DriveError, InMemoryDrive, IncomingFile, IntakePipeline, PropertyType, RemoteDrive,
    RemoteFolder, ScratchStorage, ValidatedSubmission,
};

pub const ROOT_ID: &str = "root-folder";

pub fn category_path() -> Vec<String> {
    vec!["Appraisals".to_string(), "Comparative".to_string()]
}

/// Isolated scratch directory plus an in-memory drive.
pub struct TestHarness {
    temp_dir: TempDir,
    pub scratch_dir: PathBuf,
    pub drive: Arc<InMemoryDrive>,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let scratch_dir = temp_dir.path().join("scratch");
        Self {
            temp_dir,
            scratch_dir,
            drive: Arc::new(InMemoryDrive::new()),
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn pipeline(&self) -> IntakePipeline {
        self.pipeline_with(self.drive.clone())
    }

    pub fn pipeline_with(&self, drive: Arc<dyn RemoteDrive>) -> IntakePipeline {
        IntakePipeline::new(
            drive,
            ScratchStorage::new(&self.scratch_dir),
            ROOT_ID,
            category_path(),
        )
    }
}

pub fn submission(photo_count: usize) -> ValidatedSubmission {
    ValidatedSubmission {
        property_type: PropertyType::House,
        tax_document: IncomingFile::new("IPTU 2026.pdf", b"%PDF-1.7 tax".to_vec()),
        photos: (0..photo_count)
            .map(|i| IncomingFile::new(format!("foto {}.jpg", i + 1), vec![0xFF, 0xD8, i as u8]))
            .collect(),
    }
}

/// Wraps an `InMemoryDrive` and fails the n-th upload (1-based).
pub struct FailingDrive {
    pub inner: InMemoryDrive,
    fail_on_upload: usize,
    uploads: AtomicUsize,
}

impl FailingDrive {
    pub fn failing_upload(n: usize) -> Self {
        Self {
            inner: InMemoryDrive::new(),
            fail_on_upload: n,
            uploads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RemoteDrive for FailingDrive {
    async fn list(&self, parent_id: &str) -> Result<Vec<RemoteEntry>, DriveError> {
        self.inner.list(parent_id).await
    }

    async fn mkdir(&self, name: &str, parent_id: &str) -> Result<RemoteFolder, DriveError> {
        self.inner.mkdir(name, parent_id).await
    }

    async fn upload(&self, local_path: &Path, parent_id: &str) -> Result<RemoteObject, DriveError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on_upload {
            return Err(DriveError::CommandFailed {
                subcommand: "upload".to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.upload(local_path, parent_id).await
    }

    async fn link(&self, id: &str) -> Result<Option<String>, DriveError> {
        self.inner.link(id).await
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
