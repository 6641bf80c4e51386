//! Error types for the FarmTech library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FarmTech operations.
#[derive(Debug, Error)]
pub enum FarmTechError {
    /// Crop type not in the recognized enumeration.
    #[error("Invalid crop type '{0}': expected 'soy' or 'coffee'")]
    InvalidCropType(String),

    /// A geometric dimension is missing, non-numeric, zero, or negative.
    #[error("Invalid dimension '{field}': {reason}")]
    InvalidDimension { field: String, reason: String },

    /// An input's rate per area is missing, non-numeric, zero, or negative.
    #[error("Invalid rate per area: {0}")]
    InvalidRate(String),

    /// Input name was blank.
    #[error("Input name must not be empty")]
    EmptyInputName,

    /// Referenced culture id does not exist.
    #[error("No culture found with id {id}")]
    NotFound { id: u64 },

    /// Referenced input position is outside the valid range.
    #[error("{}", index_message(.position, .len))]
    IndexOutOfRange { position: usize, len: usize },

    /// Every culture id has been allocated.
    #[error("No culture ids left to allocate")]
    IdsExhausted,

    /// Underlying storage could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FarmTechError {
    /// Build an [`FarmTechError::InvalidDimension`] for a named field.
    pub fn invalid_dimension(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FarmTechError::InvalidDimension {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by operator input rather than storage.
    ///
    /// These are always recoverable: the controller reports them and
    /// re-prompts.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FarmTechError::InvalidCropType(_)
                | FarmTechError::InvalidDimension { .. }
                | FarmTechError::InvalidRate(_)
                | FarmTechError::EmptyInputName
                | FarmTechError::NotFound { .. }
                | FarmTechError::IndexOutOfRange { .. }
        )
    }
}

fn index_message(position: &usize, len: &usize) -> String {
    if *len == 0 {
        format!("Input position {} is out of range: the culture has no inputs", position)
    } else {
        format!(
            "Input position {} is out of range: choose a number between 1 and {}",
            position, len
        )
    }
}

/// Result type alias for FarmTech operations.
pub type Result<T> = std::result::Result<T, FarmTechError>;
