use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Drive folder under which the category path is provisioned.
    #[serde(default)]
    pub root_folder_id: String,
    #[serde(default = "default_category_path")]
    pub category_path: Vec<String>,
    #[serde(default = "default_scratch_directory")]
    pub scratch_directory: PathBuf,
    /// Per-file upload limit.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default)]
    pub drive: DriveConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_category_path() -> Vec<String> {
    vec!["Appraisals".to_string(), "Comparative".to_string()]
}

fn default_scratch_directory() -> PathBuf {
    std::env::temp_dir().join("appraisal-intake")
}

fn default_max_file_bytes() -> u64 {
    25 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            bind_address: default_bind_address(),
            root_folder_id: String::new(),
            category_path: default_category_path(),
            scratch_directory: default_scratch_directory(),
            max_file_bytes: default_max_file_bytes(),
            drive: DriveConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveBackend {
    #[default]
    Gog,
    Memory,
}

impl std::str::FromStr for DriveBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gog" => Ok(DriveBackend::Gog),
            "memory" => Ok(DriveBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    #[serde(default)]
    pub backend: DriveBackend,
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Exported as `GOG_ACCOUNT` to the CLI when set.
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default = "default_list_max")]
    pub list_max: u32,
}

fn default_binary() -> String {
    "gog".to_string()
}

fn default_list_max() -> u32 {
    200
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            backend: DriveBackend::default(),
            binary: default_binary(),
            account: None,
            list_max: default_list_max(),
        }
    }
}
