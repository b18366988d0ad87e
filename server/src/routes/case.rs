//! Case submission endpoint.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use appraisal_intake::drive::RemoteObject;
use appraisal_intake::{CaseReceipt, IncomingFile, RemoteFolder, Submission, UploadedFile};

use crate::error::ApiError;
use crate::state::AppState;

pub const PROPERTY_TYPE_FIELD: &str = "property_type";
pub const TAX_DOCUMENT_FIELD: &str = "tax_document";
pub const PHOTOS_FIELD: &str = "photos";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseResponse {
    pub ok: bool,
    pub case_id: String,
    pub drive: DriveLocations,
    pub next: NextSteps,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveLocations {
    pub root: RemoteFolder,
    pub manifest: RemoteObject,
    pub tax_document: UploadedFile,
    pub photos: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextSteps {
    pub confirm_url: String,
}

impl From<CaseReceipt> for CreateCaseResponse {
    fn from(receipt: CaseReceipt) -> Self {
        let confirm_url = format!("/case/{}", receipt.case_id);
        Self {
            ok: true,
            case_id: receipt.case_id,
            drive: DriveLocations {
                root: receipt.root,
                manifest: receipt.manifest,
                tax_document: receipt.tax_document,
                photos: receipt.photos,
            },
            next: NextSteps { confirm_url },
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `POST /api/case/create`: validates the form, then runs the intake
/// pipeline to completion before answering.
pub async fn create_case(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CreateCaseResponse>, ApiError> {
    let mut multipart = multipart?;
    let submission = read_submission(&mut multipart).await?;

    let validated = submission.validate(state.max_file_bytes).map_err(|e| {
        info!(reason = %e, "submission rejected");
        ApiError::from(e)
    })?;

    let receipt = state.pipeline.run(validated).await?;
    Ok(Json(CreateCaseResponse::from(receipt)))
}

/// Collects the known form fields. Unknown fields are skipped; a file
/// field without a filename is treated as absent.
async fn read_submission(multipart: &mut Multipart) -> Result<Submission, MultipartError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            PROPERTY_TYPE_FIELD => {
                submission.property_type = Some(field.text().await?);
            }
            TAX_DOCUMENT_FIELD => {
                if let Some(file) = read_file(field).await? {
                    if submission.tax_document.is_none() {
                        submission.tax_document = Some(file);
                    }
                }
            }
            PHOTOS_FIELD => {
                if let Some(file) = read_file(field).await? {
                    submission.push_photo(file);
                }
            }
            _ => debug!(field = %name, "ignoring unknown form field"),
        }
    }

    Ok(submission)
}

async fn read_file(field: Field<'_>) -> Result<Option<IncomingFile>, MultipartError> {
    let Some(file_name) = field.file_name().map(str::to_string) else {
        return Ok(None);
    };
    let bytes = field.bytes().await?;

    Ok(Some(IncomingFile::new(file_name, bytes.to_vec())))
}
