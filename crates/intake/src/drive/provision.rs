//! Lookup-or-create of the per-case folder tree.
//!
//! Each segment is resolved by listing its parent and reusing a folder
//! with the same name. Nothing is locked: two requests racing on the same
//! segment can both create it.

use tracing::{debug, info};

use super::error::Result;
use super::types::{CaseFolders, EntryKind, RemoteFolder};
use super::RemoteDrive;

pub const INPUT_FOLDER: &str = "input";
pub const TAX_DOCUMENT_FOLDER: &str = "iptu";
pub const PHOTOS_FOLDER: &str = "fotos";
pub const OUTPUT_FOLDER: &str = "output";
pub const LOGS_FOLDER: &str = "logs";

/// Returns the folder named `name` under `parent_id`, creating it if absent.
/// Files with the same name are ignored.
pub async fn ensure_folder(
    drive: &dyn RemoteDrive,
    parent_id: &str,
    name: &str,
) -> Result<RemoteFolder> {
    let children = drive.list(parent_id).await?;

    if let Some(found) = children
        .into_iter()
        .find(|c| c.kind == EntryKind::Folder && c.name == name)
    {
        debug!(parent_id, name, id = %found.id, "reusing folder");
        let link = drive.link(&found.id).await?;
        return Ok(RemoteFolder { id: found.id, link });
    }

    let created = drive.mkdir(name, parent_id).await?;
    info!(parent_id, name, id = %created.id, "created folder");
    Ok(created)
}

/// Provisions `root/<category...>/<year>/<month>/<case_id>` and the fixed
/// children `input/{iptu,fotos}`, `output` and `logs`.
pub async fn provision_case_folders(
    drive: &dyn RemoteDrive,
    root_id: &str,
    category_path: &[String],
    year: &str,
    month: &str,
    case_id: &str,
) -> Result<CaseFolders> {
    let mut parent = root_id.to_string();
    for segment in category_path
        .iter()
        .map(String::as_str)
        .chain([year, month])
    {
        parent = ensure_folder(drive, &parent, segment).await?.id;
    }

    let case_root = ensure_folder(drive, &parent, case_id).await?;
    let input = ensure_folder(drive, &case_root.id, INPUT_FOLDER).await?;
    let tax_document = ensure_folder(drive, &input.id, TAX_DOCUMENT_FOLDER).await?;
    let photos = ensure_folder(drive, &input.id, PHOTOS_FOLDER).await?;
    let output = ensure_folder(drive, &case_root.id, OUTPUT_FOLDER).await?;
    let logs = ensure_folder(drive, &case_root.id, LOGS_FOLDER).await?;

    Ok(CaseFolders {
        case_root,
        input,
        tax_document,
        photos,
        output,
        logs,
    })
}
