//! Pure data types for remote drive operations.

use serde::{Deserialize, Serialize};

/// Kind of a listed drive item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// One row of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
}

/// Reference to a remote folder. Not owned by this process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolder {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Id and link returned by an upload, before the original name is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteObject {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl RemoteObject {
    pub fn named(self, name: impl Into<String>) -> UploadedFile {
        UploadedFile {
            id: self.id,
            link: self.link,
            name: name.into(),
        }
    }
}

/// An uploaded file together with the filename the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub name: String,
}

/// Folders provisioned for a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFolders {
    pub case_root: RemoteFolder,
    pub input: RemoteFolder,
    pub tax_document: RemoteFolder,
    pub photos: RemoteFolder,
    pub output: RemoteFolder,
    pub logs: RemoteFolder,
}
