use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::case::{Case, Manifest};
use crate::config::{Config, DriveBackend};
use crate::drive::provision::{PHOTOS_FOLDER, TAX_DOCUMENT_FOLDER};
use crate::drive::{provision_case_folders, GogDrive, InMemoryDrive, RemoteDrive, UploadedFile};
use crate::error::Result;
use crate::intake::{IncomingFile, ValidatedSubmission};
use crate::sanitize;
use crate::storage::ScratchStorage;

use super::context::{CaseReceipt, PipelineContext};

/// Runs one submission: provision folders, stage and upload the tax
/// document, then each photo, then the manifest. The first failure aborts
/// the run; remote folders and files created before it are left in place.
pub struct IntakePipeline {
    drive: Arc<dyn RemoteDrive>,
    storage: ScratchStorage,
    root_folder_id: String,
    category_path: Vec<String>,
}

impl IntakePipeline {
    /// Picks the drive backend named in config.
    pub fn from_config(config: &Config) -> Self {
        let drive: Arc<dyn RemoteDrive> = match config.drive.backend {
            DriveBackend::Gog => Arc::new(GogDrive::from_config(&config.drive)),
            DriveBackend::Memory => Arc::new(InMemoryDrive::new()),
        };

        Self::new(
            drive,
            ScratchStorage::new(&config.scratch_directory),
            config.root_folder_id.clone(),
            config.category_path.clone(),
        )
    }

    pub fn new(
        drive: Arc<dyn RemoteDrive>,
        storage: ScratchStorage,
        root_folder_id: impl Into<String>,
        category_path: Vec<String>,
    ) -> Self {
        Self {
            drive,
            storage,
            root_folder_id: root_folder_id.into(),
            category_path,
        }
    }

    /// Creates a new case for the submission and runs it.
    pub async fn run(&self, submission: ValidatedSubmission) -> Result<CaseReceipt> {
        let case = Case::new(submission.property_type);
        self.run_case(case, submission).await
    }

    /// Runs the pipeline for an already created case.
    pub async fn run_case(
        &self,
        case: Case,
        submission: ValidatedSubmission,
    ) -> Result<CaseReceipt> {
        let span = info_span!("intake",
            case_id = %case.id,
            property_type = %case.property_type,
            photos = submission.photos.len(),
            backend = self.drive.backend_name(),
        );

        async move {
            let mut ctx = PipelineContext::new(case);
            let result = self.run_steps(&mut ctx, submission).await;
            match &result {
                Ok(_) => info!("case received"),
                Err(e) => warn!(error = %e, "intake aborted"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_steps(
        &self,
        ctx: &mut PipelineContext,
        submission: ValidatedSubmission,
    ) -> Result<CaseReceipt> {
        // Step 1: Provision folder tree
        self.step_provision(ctx)
            .instrument(info_span!("provision_folders"))
            .await?;

        // Step 2: Tax document
        self.step_upload_tax_document(ctx, &submission.tax_document)
            .instrument(info_span!("upload_tax_document"))
            .await?;

        // Step 3: Photos, one at a time
        self.step_upload_photos(ctx, &submission.photos)
            .instrument(info_span!("upload_photos"))
            .await?;

        // Step 4: Manifest, last
        self.step_upload_manifest(ctx)
            .instrument(info_span!("upload_manifest"))
            .await?;

        Ok(build_receipt(ctx))
    }

    async fn step_provision(&self, ctx: &mut PipelineContext) -> Result<()> {
        let case_id = ctx.case.id.to_string();
        let folders = provision_case_folders(
            self.drive.as_ref(),
            &self.root_folder_id,
            &self.category_path,
            &ctx.case.year_segment(),
            &ctx.case.month_segment(),
            &case_id,
        )
        .await?;

        debug!(case_root = %folders.case_root.id, "folders ready");
        ctx.folders = Some(folders);
        Ok(())
    }

    async fn step_upload_tax_document(
        &self,
        ctx: &mut PipelineContext,
        file: &IncomingFile,
    ) -> Result<()> {
        let folder_id = folders(ctx).tax_document.id.clone();
        let uploaded = self
            .stage_and_upload(ctx, TAX_DOCUMENT_FOLDER, &folder_id, file)
            .await?;
        ctx.tax_document = Some(uploaded);
        Ok(())
    }

    async fn step_upload_photos(
        &self,
        ctx: &mut PipelineContext,
        photos: &[IncomingFile],
    ) -> Result<()> {
        let folder_id = folders(ctx).photos.id.clone();
        for photo in photos {
            let uploaded = self
                .stage_and_upload(ctx, PHOTOS_FOLDER, &folder_id, photo)
                .await?;
            ctx.photos.push(uploaded);
        }
        Ok(())
    }

    async fn step_upload_manifest(&self, ctx: &mut PipelineContext) -> Result<()> {
        let folders = folders(ctx);
        let tax_document = ctx
            .tax_document
            .clone()
            .expect("tax document uploaded before manifest");
        let manifest = Manifest::new(&ctx.case, folders, tax_document, ctx.photos.clone());

        let json = serde_json::to_vec_pretty(&manifest)?;
        let case_id = ctx.case.id.to_string();
        let path = self.storage.write_manifest(&case_id, &json).await?;

        let uploaded = self.drive.upload(&path, &folders.logs.id).await?;
        debug!(id = %uploaded.id, "manifest uploaded");
        ctx.manifest = Some(uploaded);
        Ok(())
    }

    async fn stage_and_upload(
        &self,
        ctx: &PipelineContext,
        subdir: &str,
        folder_id: &str,
        file: &IncomingFile,
    ) -> Result<UploadedFile> {
        let case_id = ctx.case.id.to_string();
        let path = self
            .storage
            .stage(&case_id, subdir, &file.file_name, &file.bytes)
            .await?;

        let staged = sanitize::redact_path(&path);
        debug!(staged = %staged, bytes = file.len(), "staged");

        let uploaded = self.drive.upload(&path, folder_id).await?;
        Ok(uploaded.named(&file.file_name))
    }
}

fn folders(ctx: &PipelineContext) -> &crate::drive::CaseFolders {
    ctx.folders
        .as_ref()
        .expect("folders provisioned in step 1")
}

fn build_receipt(ctx: &PipelineContext) -> CaseReceipt {
    let folders = folders(ctx);
    CaseReceipt {
        case_id: ctx.case.id.to_string(),
        root: folders.case_root.clone(),
        manifest: ctx.manifest.clone().expect("manifest uploaded in step 4"),
        tax_document: ctx
            .tax_document
            .clone()
            .expect("tax document uploaded in step 2"),
        photos: ctx.photos.clone(),
    }
}
