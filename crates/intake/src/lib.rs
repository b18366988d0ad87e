pub mod case;
pub mod config;
pub mod drive;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod sanitize;
pub mod storage;

pub use case::{Case, CaseStatus, Manifest, PropertyType};
pub use config::{load_config, resolve_config, Config, DriveBackend};
pub use drive::{DriveError, GogDrive, InMemoryDrive, RemoteDrive, RemoteFolder, UploadedFile};
pub use error::{ConfigError, IntakeError, Result, StorageError, ValidationError};
pub use intake::{IncomingFile, Submission, ValidatedSubmission, MAX_PHOTOS};
pub use pipeline::{CaseReceipt, IntakePipeline};
pub use storage::ScratchStorage;
