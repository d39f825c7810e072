//! Error types for pixhom.

use thiserror::Error;

/// Result alias for pixhom operations.
pub type PixHomResult<T> = std::result::Result<T, PixHomError>;

/// Errors that can occur when building merge trees or persistence diagrams.
///
/// A zero-sized grid is not an error: it yields an empty forest and an empty
/// diagram.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PixHomError {
    /// Row/column counts are negative, overflow, or disagree with the buffer.
    #[error("invalid grid dimensions: rows={rows}, cols={cols}")]
    InvalidDimensions { rows: i64, cols: i64 },
    /// The buffer length does not equal `rows * cols`.
    #[error("buffer length mismatch: needed {needed}, got {got}")]
    BufferLength { needed: usize, got: usize },
    /// The grid contains a NaN value.
    #[error("grid value at index {index} is NaN")]
    NanValue { index: usize },
    /// A parent array points out of range or contains a cycle.
    #[error("invalid parent chain at pixel {index}")]
    InvalidParent { index: usize },
    /// A scratch buffer could not grow.
    #[error("allocation failed for {what}")]
    AllocationFailure { what: &'static str },
    /// Image decoding failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
