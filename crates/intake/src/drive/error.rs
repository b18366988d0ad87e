//! Remote drive error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("drive {subcommand} failed: {message}")]
    CommandFailed { subcommand: String, message: String },

    #[error("drive {subcommand} returned unexpected output: {output}")]
    UnexpectedOutput { subcommand: String, output: String },

    #[error("Local file not readable '{path}': {message}")]
    LocalFile { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, DriveError>;
