use crate::case::Case;
use crate::drive::{CaseFolders, RemoteFolder, RemoteObject, UploadedFile};

pub struct PipelineContext {
    // Input
    pub case: Case,

    // Step 1 result, Some after step_provision
    pub folders: Option<CaseFolders>,

    // Step 2 result
    pub tax_document: Option<UploadedFile>,

    // Step 3 results, in submission order
    pub photos: Vec<UploadedFile>,

    // Step 4 result
    pub manifest: Option<RemoteObject>,
}

impl PipelineContext {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            folders: None,
            tax_document: None,
            photos: Vec::new(),
            manifest: None,
        }
    }
}

/// Outcome of a completed submission.
#[derive(Debug, Clone)]
pub struct CaseReceipt {
    pub case_id: String,
    pub root: RemoteFolder,
    pub manifest: RemoteObject,
    pub tax_document: UploadedFile,
    pub photos: Vec<UploadedFile>,
}
