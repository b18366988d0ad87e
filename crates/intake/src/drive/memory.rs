//! In-process drive for local development and tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{DriveError, Result};
use super::types::{EntryKind, RemoteEntry, RemoteFolder, RemoteObject};
use super::RemoteDrive;

#[derive(Debug, Clone)]
struct Node {
    id: String,
    parent_id: String,
    name: String,
    kind: EntryKind,
    size: u64,
}

/// Drive that keeps its tree in memory. Uploaded file contents are not
/// retained, only their name and size.
#[derive(Debug, Default)]
pub struct InMemoryDrive {
    nodes: Mutex<Vec<Node>>,
    next_id: AtomicUsize,
    mkdir_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

impl InMemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("mem-{}", n)
    }

    fn insert(&self, node: Node) {
        self.nodes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(node);
    }

    fn link_for(id: &str) -> String {
        format!("memory://drive/{}", id)
    }

    /// Number of `mkdir` calls served so far.
    pub fn mkdir_count(&self) -> usize {
        self.mkdir_calls.load(Ordering::SeqCst)
    }

    /// Number of `upload` calls served so far.
    pub fn upload_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Names of the direct children of `parent_id`, in creation order.
    pub fn child_names(&self, parent_id: &str) -> Vec<String> {
        self.nodes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|n| n.parent_id == parent_id)
            .map(|n| n.name.clone())
            .collect()
    }

    /// Size in bytes of an uploaded file.
    pub fn file_size(&self, id: &str) -> Option<u64> {
        self.nodes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|n| n.id == id && n.kind == EntryKind::File)
            .map(|n| n.size)
    }
}

#[async_trait]
impl RemoteDrive for InMemoryDrive {
    async fn list(&self, parent_id: &str) -> Result<Vec<RemoteEntry>> {
        let nodes = self
            .nodes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(nodes
            .iter()
            .filter(|n| n.parent_id == parent_id)
            .map(|n| RemoteEntry {
                id: n.id.clone(),
                name: n.name.clone(),
                kind: n.kind,
            })
            .collect())
    }

    async fn mkdir(&self, name: &str, parent_id: &str) -> Result<RemoteFolder> {
        self.mkdir_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.allocate_id();
        self.insert(Node {
            id: id.clone(),
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            kind: EntryKind::Folder,
            size: 0,
        });
        Ok(RemoteFolder {
            link: Some(Self::link_for(&id)),
            id,
        })
    }

    async fn upload(&self, local_path: &Path, parent_id: &str) -> Result<RemoteObject> {
        let metadata = tokio::fs::metadata(local_path)
            .await
            .map_err(|e| DriveError::LocalFile {
                path: local_path.display().to_string(),
                message: e.to_string(),
            })?;
        let name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DriveError::LocalFile {
                path: local_path.display().to_string(),
                message: "path has no file name".to_string(),
            })?;

        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.allocate_id();
        self.insert(Node {
            id: id.clone(),
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            kind: EntryKind::File,
            size: metadata.len(),
        });
        Ok(RemoteObject {
            link: Some(Self::link_for(&id)),
            id,
        })
    }

    async fn link(&self, id: &str) -> Result<Option<String>> {
        let nodes = self
            .nodes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(nodes
            .iter()
            .any(|n| n.id == id)
            .then(|| Self::link_for(id)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
