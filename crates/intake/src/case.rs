//! Case model and the manifest written for every submission.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drive::{RemoteFolder, UploadedFile};
use crate::error::ValidationError;

/// Kind of property being appraised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Land,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Land => "land",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(PropertyType::Apartment),
            "house" => Ok(PropertyType::House),
            "land" => Ok(PropertyType::Land),
            _ => Err(ValidationError::InvalidPropertyType),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Received,
}

/// One appraisal submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: Uuid,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
    pub status: CaseStatus,
}

impl Case {
    pub fn new(property_type: PropertyType) -> Self {
        Self::with_timestamp(property_type, Utc::now())
    }

    pub fn with_timestamp(property_type: PropertyType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_type,
            created_at,
            status: CaseStatus::Received,
        }
    }

    /// Four-digit year folder name.
    pub fn year_segment(&self) -> String {
        format!("{:04}", self.created_at.year())
    }

    /// Zero-padded month folder name.
    pub fn month_segment(&self) -> String {
        format!("{:02}", self.created_at.month())
    }
}

/// Folder reference without a link, as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderId {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDocumentEntry {
    pub id: String,
    pub file: UploadedFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotosEntry {
    pub id: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDrive {
    pub root_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_link: Option<String>,
    pub input: FolderId,
    pub tax_document: TaxDocumentEntry,
    pub photos: PhotosEntry,
    pub output: FolderId,
    pub logs: FolderId,
}

/// The `case.json` document uploaded into the case's `logs` folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub case_id: String,
    pub property_type: PropertyType,
    pub created_at: String,
    pub status: CaseStatus,
    pub drive: ManifestDrive,
}

impl Manifest {
    pub fn new(
        case: &Case,
        folders: &crate::drive::CaseFolders,
        tax_document: UploadedFile,
        photos: Vec<UploadedFile>,
    ) -> Self {
        Self {
            case_id: case.id.to_string(),
            property_type: case.property_type,
            created_at: case.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: case.status,
            drive: ManifestDrive {
                root_id: folders.case_root.id.clone(),
                root_link: folders.case_root.link.clone(),
                input: folder_id(&folders.input),
                tax_document: TaxDocumentEntry {
                    id: folders.tax_document.id.clone(),
                    file: tax_document,
                },
                photos: PhotosEntry {
                    id: folders.photos.id.clone(),
                    files: photos,
                },
                output: folder_id(&folders.output),
                logs: folder_id(&folders.logs),
            },
        }
    }
}

fn folder_id(folder: &RemoteFolder) -> FolderId {
    FolderId {
        id: folder.id.clone(),
    }
}
