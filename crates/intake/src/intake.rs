//! Intake validation: turns raw form input into a submission the
//! pipeline can run.

use crate::case::PropertyType;
use crate::error::ValidationError;

/// Maximum number of photos per case.
pub const MAX_PHOTOS: usize = 5;

/// A file received from the client, fully buffered.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Filename as sent by the client (unsanitized).
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw form input, before any checks.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub property_type: Option<String>,
    pub tax_document: Option<IncomingFile>,
    pub photos: Vec<IncomingFile>,
}

impl Submission {
    /// Adds a photo part. Parts with neither a name nor content are what
    /// browsers send for an untouched file input and are dropped.
    pub fn push_photo(&mut self, file: IncomingFile) {
        if file.file_name.is_empty() && file.is_empty() {
            return;
        }
        self.photos.push(file);
    }

    /// Checks property type, tax document, photo count and file sizes, in
    /// that order.
    pub fn validate(self, max_file_bytes: u64) -> Result<ValidatedSubmission, ValidationError> {
        let property_type: PropertyType = self
            .property_type
            .as_deref()
            .ok_or(ValidationError::InvalidPropertyType)?
            .parse()?;

        let tax_document = match self.tax_document {
            Some(file) if !file.is_empty() => file,
            _ => return Err(ValidationError::MissingTaxDocument),
        };

        if self.photos.len() > MAX_PHOTOS {
            return Err(ValidationError::TooManyPhotos {
                count: self.photos.len(),
                max: MAX_PHOTOS,
            });
        }

        for file in std::iter::once(&tax_document).chain(self.photos.iter()) {
            if file.len() as u64 > max_file_bytes {
                return Err(ValidationError::FileTooLarge {
                    name: file.file_name.clone(),
                    max_bytes: max_file_bytes,
                });
            }
        }

        Ok(ValidatedSubmission {
            property_type,
            tax_document,
            photos: self.photos,
        })
    }
}

/// Input that passed every check.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub property_type: PropertyType,
    pub tax_document: IncomingFile,
    pub photos: Vec<IncomingFile>,
}
