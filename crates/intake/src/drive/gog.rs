//! `gog drive` CLI adapter.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::error::{DriveError, Result};
use super::parse::{describe_failure, parse_created, parse_listing, parse_url};
use super::types::{RemoteEntry, RemoteFolder, RemoteObject};
use super::RemoteDrive;
use crate::config::DriveConfig;
use crate::sanitize;

/// Account selector read by the CLI.
const ACCOUNT_ENV: &str = "GOG_ACCOUNT";

/// Remote drive backed by the `gog` command-line tool.
pub struct GogDrive {
    /// Program to execute, looked up on `PATH` when not absolute.
    binary: PathBuf,
    /// Account passed through `GOG_ACCOUNT`; inherited from the process when `None`.
    account: Option<String>,
    /// Page size for folder listings.
    list_max: u32,
}

impl GogDrive {
    pub fn new(binary: impl Into<PathBuf>, account: Option<String>, list_max: u32) -> Self {
        Self {
            binary: binary.into(),
            account,
            list_max,
        }
    }

    pub fn from_config(config: &DriveConfig) -> Self {
        Self::new(&config.binary, config.account.clone(), config.list_max)
    }

    /// Runs `<binary> drive <args...>` and returns stdout on success.
    async fn run_drive(&self, subcommand: &str, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("drive")
            .arg(subcommand)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(account) = &self.account {
            cmd.env(ACCOUNT_ENV, account);
        }

        debug!(subcommand, "running drive command");

        let output: Output = cmd.output().await.map_err(|e| DriveError::Spawn {
            program: self.binary.display().to_string(),
            source: e,
        })?;

        if !output.status.success() {
            let message = describe_failure(&output);
            warn!(subcommand, status = ?output.status.code(), "drive command failed");
            return Err(DriveError::CommandFailed {
                subcommand: subcommand.to_string(),
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl RemoteDrive for GogDrive {
    async fn list(&self, parent_id: &str) -> Result<Vec<RemoteEntry>> {
        let max = self.list_max.to_string();
        let stdout = self
            .run_drive("ls", &["--plain", "--max", &max, "--parent", parent_id])
            .await?;
        Ok(parse_listing(&stdout))
    }

    async fn mkdir(&self, name: &str, parent_id: &str) -> Result<RemoteFolder> {
        let stdout = self
            .run_drive("mkdir", &[name, "--parent", parent_id])
            .await?;
        let created = parse_created(&stdout, "mkdir")?;
        Ok(RemoteFolder {
            id: created.id,
            link: created.link,
        })
    }

    async fn upload(&self, local_path: &Path, parent_id: &str) -> Result<RemoteObject> {
        let path = local_path.to_str().ok_or_else(|| DriveError::LocalFile {
            path: local_path.display().to_string(),
            message: "path is not valid UTF-8".to_string(),
        })?;

        debug!(file = %sanitize::redact_path(local_path), "uploading");

        let stdout = self
            .run_drive("upload", &[path, "--parent", parent_id])
            .await?;
        parse_created(&stdout, "upload")
    }

    async fn link(&self, id: &str) -> Result<Option<String>> {
        let stdout = self.run_drive("url", &[id]).await?;
        Ok(parse_url(&stdout))
    }

    fn backend_name(&self) -> &'static str {
        "gog"
    }
}
