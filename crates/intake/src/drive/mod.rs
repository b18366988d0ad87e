//! Remote drive access: the `RemoteDrive` seam, the `gog` CLI adapter,
//! an in-memory drive for local runs, and folder provisioning.

pub mod error;
pub mod gog;
pub mod memory;
pub mod parse;
pub mod provision;
pub mod types;

use std::path::Path;

use async_trait::async_trait;

pub use error::{DriveError, Result};
pub use gog::GogDrive;
pub use memory::InMemoryDrive;
pub use provision::{ensure_folder, provision_case_folders};
pub use types::*;

/// Operations the intake pipeline needs from a cloud drive.
#[async_trait]
pub trait RemoteDrive: Send + Sync {
    /// Lists the direct children of a folder.
    async fn list(&self, parent_id: &str) -> Result<Vec<RemoteEntry>>;

    /// Creates a folder under `parent_id`.
    async fn mkdir(&self, name: &str, parent_id: &str) -> Result<RemoteFolder>;

    /// Uploads a local file into `parent_id`.
    async fn upload(&self, local_path: &Path, parent_id: &str) -> Result<RemoteObject>;

    /// Returns the browsable link for an item, if the drive has one.
    async fn link(&self, id: &str) -> Result<Option<String>>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
