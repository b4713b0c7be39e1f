//! Error types for visionassist.

use thiserror::Error;

/// Result alias for visionassist operations.
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors that can occur while decoding a frame or preparing its inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetectError {
    /// Buffer length disagrees with the declared tensor shape.
    #[error("tensor shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    /// Rows are too narrow to hold box geometry plus objectness.
    #[error("row width {row_width} is smaller than the 5 geometry/objectness fields")]
    RowTooNarrow { row_width: usize },
    /// Declared shape has an unsupported rank or batch size.
    #[error("invalid tensor shape: {reason}")]
    InvalidShape { reason: &'static str },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than a packed row.
    #[error("invalid stride: row needs {row_len} elements, stride is {stride}")]
    InvalidStride { row_len: usize, stride: usize },
    /// Pixel buffer is too short for the declared frame geometry.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The label table could not be read.
    #[error("label table I/O failed: {reason}")]
    LabelIo { reason: String },
    /// Image decoding failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
    /// The inference provider reported a failure.
    #[error("inference failed: {reason}")]
    Inference { reason: String },
}

impl DetectError {
    /// Returns true for malformed-tensor errors that are isolated to one frame.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            DetectError::ShapeMismatch { .. }
                | DetectError::RowTooNarrow { .. }
                | DetectError::InvalidShape { .. }
        )
    }
}
