//! Error types for vitrina-core

use thiserror::Error;

use crate::models::EntryId;

/// Result type alias using vitrina-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitrina-core operations
///
/// Validation and capacity variants are per-file / per-batch and never fatal:
/// the store stays consistent after any rejected operation.
#[derive(Error, Debug)]
pub enum Error {
    /// File is not one of the accepted raster image formats
    #[error("\"{file_name}\" is not an accepted image format ({mime_type}); use JPEG, PNG, WebP or GIF")]
    InvalidFormat { file_name: String, mime_type: String },

    /// File exceeds the upload size ceiling
    #[error("\"{file_name}\" is {size_bytes} bytes, over the {limit_bytes} byte limit")]
    FileTooLarge {
        file_name: String,
        size_bytes: usize,
        limit_bytes: usize,
    },

    /// Image decoded below the minimum pixel dimensions
    #[error("\"{file_name}\" is {width}x{height}px; images must be at least {min_width}x{min_height}px")]
    DimensionsTooSmall {
        file_name: String,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// Image bytes could not be decoded
    #[error("\"{file_name}\" could not be read as an image: {reason}")]
    DecodeFailure { file_name: String, reason: String },

    /// No free slot left in the gallery
    #[error("Gallery is full: {dropped} file(s) skipped (maximum {max_entries} images)")]
    CapacityExceeded { dropped: usize, max_entries: usize },

    /// Operation targeted an entry that is not in the gallery
    #[error("No gallery entry with id {0}")]
    UnknownEntry(EntryId),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error rejects a single file without aborting its batch.
    #[must_use]
    pub const fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::FileTooLarge { .. }
                | Self::DimensionsTooSmall { .. }
                | Self::DecodeFailure { .. }
        )
    }
}
