use std::path::PathBuf;
use thiserror::Error;

use crate::drive::DriveError;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Remote drive error: {0}")]
    Drive(#[from] DriveError),

    #[error("Staging error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Client input errors. Every variant maps to a 400 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid property type")]
    InvalidPropertyType,

    #[error("tax document is required")]
    MissingTaxDocument,

    #[error("at most {max} photos allowed, got {count}")]
    TooManyPhotos { count: usize, max: usize },

    #[error("file '{name}' exceeds the {max_bytes} byte limit")]
    FileTooLarge { name: String, max_bytes: u64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnv { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find a free file name for '{0}'")]
    NameExhausted(PathBuf),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
