//! Custom error types for cobsimg operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for cobsimg operations
pub type Result<T> = std::result::Result<T, CobsImgError>;

/// Error type for cobsimg operations
#[derive(Error, Debug)]
pub enum CobsImgError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "COBS index", "PNG image")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// The `CLASSIC_INDEX` marker could not be found
    #[error("Not a COBS classic index: {occurrence} occurrence of marker '{marker}' not found")]
    MarkerNotFound {
        /// The marker that was searched for
        marker: String,
        /// Which occurrence was missing ("first" or "second")
        occurrence: &'static str,
    },

    /// Row width cannot hold whole payload bytes
    #[error("Width {width} is not divisible by 8, bloom filter data would not be byte aligned")]
    UnalignedWidth {
        /// The rejected width in bits
        width: usize,
    },

    /// The reconstructed index differs from the original
    #[error(
        "Round-trip check failed: reconstructed index '{reconstructed}' differs from original \
         '{original}' ({detail})"
    )]
    IntegrityMismatch {
        /// Path to the original index
        original: PathBuf,
        /// Path to the reconstructed index
        reconstructed: PathBuf,
        /// Where the two files first diverge
        detail: String,
    },

    /// A required key is absent from a metadata file
    #[error("Metadata key '{key}' not found in '{path}'")]
    MetadataKeyMissing {
        /// The missing key
        key: String,
        /// Path to the metadata file
        path: String,
    },

    /// A metadata line could not be parsed
    #[error("Invalid metadata at line {line} of '{path}': {reason}")]
    InvalidMetadata {
        /// Path to the metadata file
        path: String,
        /// 1-based line number
        line: usize,
        /// Explanation of the problem
        reason: String,
    },

    /// The image exceeds the caller's pixel limit
    #[error("Image of {width}x{height} pixels exceeds the pixel limit of {limit}")]
    PixelLimitExceeded {
        /// Image width in pixels
        width: u64,
        /// Image height in pixels
        height: u64,
        /// Configured maximum pixel count
        limit: u64,
    },

    /// PNG encoding failed
    #[error("Failed to encode PNG image: {0}")]
    ImageEncode(#[from] png::EncodingError),

    /// PNG decoding failed
    #[error("Failed to decode PNG image: {0}")]
    ImageDecode(#[from] png::DecodingError),

    /// A metrics file could not be written
    #[error("Failed to write {description} metrics: {}: {reason}", path.display())]
    MetricsWrite {
        /// Human-readable name of the metric
        description: String,
        /// Destination file
        path: PathBuf,
        /// Underlying writer error
        reason: String,
    },

    /// I/O failure on a named file
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
}

impl CobsImgError {
    /// Builds a closure mapping an `io::Error` to [`CobsImgError::Io`] for `path`.
    pub fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
