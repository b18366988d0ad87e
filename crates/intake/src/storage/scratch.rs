use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::sanitize::sanitize_filename;

/// Name of the manifest file inside a case's scratch directory.
pub const MANIFEST_FILE: &str = "case.json";

/// Local buffer for uploads. Every case gets `<root>/<case_id>/`.
#[derive(Debug, Clone)]
pub struct ScratchStorage {
    root: PathBuf,
}

impl ScratchStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn case_dir(&self, case_id: &str) -> PathBuf {
        self.root.join(case_id)
    }

    /// Writes `content` to `<root>/<case_id>/<subdir>/<millis>-<safe name>`
    /// and returns the path.
    pub async fn stage(
        &self,
        case_id: &str,
        subdir: &str,
        original_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let dir_path = self.case_dir(case_id).join(subdir);
        ensure_directory(&dir_path).await?;

        let filename = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_name)
        );
        create_exclusive(&dir_path, &filename, content).await
    }

    /// Writes the pretty-printed manifest to `<root>/<case_id>/case.json`,
    /// replacing any previous one.
    pub async fn write_manifest(
        &self,
        case_id: &str,
        manifest_json: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let dir_path = self.case_dir(case_id);
        ensure_directory(&dir_path).await?;

        let path = dir_path.join(MANIFEST_FILE);
        tokio::fs::write(&path, manifest_json)
            .await
            .map_err(|e| StorageError::WriteFile {
                path: path.clone(),
                source: e,
            })?;
        Ok(path)
    }
}

async fn ensure_directory(path: &Path) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| StorageError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Creates the file with `create_new`, appending `_2`, `_3`, ... to the
/// stem when the name is taken.
async fn create_exclusive(
    dir_path: &Path,
    filename: &str,
    content: &[u8],
) -> Result<PathBuf, StorageError> {
    let (base, ext) = match filename.rfind('.') {
        Some(dot_pos) if dot_pos > 0 => (&filename[..dot_pos], Some(&filename[dot_pos..])),
        _ => (filename, None),
    };

    for counter in 1..=1000 {
        let try_filename = if counter == 1 {
            filename.to_string()
        } else {
            match ext {
                Some(ext) => format!("{}_{}{}", base, counter, ext),
                None => format!("{}_{}", base, counter),
            }
        };

        let try_path = dir_path.join(&try_filename);

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&try_path)
            .await
        {
            Ok(mut file) => {
                let written = match file.write_all(content).await {
                    Ok(()) => file.flush().await,
                    Err(e) => Err(e),
                };
                written.map_err(|e| StorageError::WriteFile {
                    path: try_path.clone(),
                    source: e,
                })?;
                return Ok(try_path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(StorageError::WriteFile {
                    path: try_path,
                    source: e,
                });
            }
        }
    }

    Err(StorageError::NameExhausted(dir_path.join(filename)))
}
