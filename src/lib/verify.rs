//! Round-trip verification of compressed indexes.
//!
//! An index is rebuilt from its artifacts as
//! `header ++ take_bits(decode(full_image), BF_size)` and compared byte for
//! byte with the original. Only an exact match certifies the artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::errors::{CobsImgError, Result};
use crate::image::{self, CodecOptions};
use crate::matrix::BitMatrix;
use crate::metadata::IndexMetadata;

/// Suffix appended to the original index path for the reconstructed copy.
pub const RECONSTRUCTED_SUFFIX: &str = ".decompressed";

/// The files involved in a round-trip check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaths {
    /// Full compressed image (`X.all.png`).
    pub image: PathBuf,
    /// Header blob (`X.cobs_header.bin`).
    pub header: PathBuf,
    /// Metadata (`X.cobs_header.metadata`).
    pub metadata: PathBuf,
    /// The original, uncompressed index.
    pub original: PathBuf,
    /// Where the reconstructed index is written.
    pub reconstructed: PathBuf,
}

impl VerifyPaths {
    /// Builds the path set, writing the reconstruction next to the original
    /// as `<original>.decompressed`.
    #[must_use]
    pub fn new(image: PathBuf, header: PathBuf, metadata: PathBuf, original: PathBuf) -> Self {
        let reconstructed = default_reconstructed_path(&original);
        Self { image, header, metadata, original, reconstructed }
    }

    /// Overrides where the reconstructed index is written.
    #[must_use]
    pub fn with_reconstructed(mut self, reconstructed: PathBuf) -> Self {
        self.reconstructed = reconstructed;
        self
    }
}

/// `<original>.decompressed`.
#[must_use]
pub fn default_reconstructed_path(original: &Path) -> PathBuf {
    let mut name = original.as_os_str().to_owned();
    name.push(RECONSTRUCTED_SUFFIX);
    PathBuf::from(name)
}

/// Rebuilds an index from a header and the matrix decoded from its images.
///
/// The matrix is flattened row-major and truncated to `metadata.bf_size`
/// bits, dropping the padding, before being appended to the header.
///
/// # Errors
/// Returns [`CobsImgError::InvalidFileFormat`] if the matrix holds fewer
/// than `BF_size` bits; `source` names the image(s) in that message.
pub fn reconstruct(
    header: &[u8],
    matrix: &BitMatrix,
    metadata: &IndexMetadata,
    source: &str,
) -> Result<Vec<u8>> {
    let n_bits = metadata.bf_size_bits()?;
    if matrix.len_bits() < n_bits {
        return Err(CobsImgError::InvalidFileFormat {
            file_type: "PNG image".to_string(),
            path: source.to_string(),
            reason: format!(
                "holds {} bits but BF_size is {n_bits}",
                matrix.len_bits()
            ),
        });
    }
    if let Some(width) = metadata.width {
        if width != matrix.width() as u64 {
            warn!("Image width {} differs from recorded width {width}", matrix.width());
        }
    }

    let payload = matrix.take_bits(n_bits);
    let mut index = Vec::with_capacity(header.len() + payload.len());
    index.extend_from_slice(header);
    index.extend_from_slice(&payload);
    Ok(index)
}

/// Reads the image, header and metadata named in `paths` and rebuilds the
/// index in memory.
///
/// # Errors
/// Returns an error if any input cannot be read or decoded.
pub fn reconstruct_from_files(paths: &VerifyPaths, options: &CodecOptions) -> Result<Vec<u8>> {
    let metadata = IndexMetadata::read(&paths.metadata)?;
    let matrix = image::read_image(&paths.image, options)?;
    let header = fs::read(&paths.header).map_err(CobsImgError::io(&paths.header))?;
    reconstruct(&header, &matrix, &metadata, &paths.image.display().to_string())
}

/// Describes where two byte sequences first differ, or `None` if equal.
#[must_use]
pub fn first_difference(original: &[u8], reconstructed: &[u8]) -> Option<String> {
    if let Some(pos) = original.iter().zip(reconstructed).position(|(a, b)| a != b) {
        return Some(format!(
            "first difference at byte {pos}: expected 0x{:02X}, found 0x{:02X}",
            original[pos], reconstructed[pos]
        ));
    }
    if original.len() != reconstructed.len() {
        return Some(format!(
            "length differs: original is {} bytes, reconstructed is {} bytes",
            original.len(),
            reconstructed.len()
        ));
    }
    None
}

fn check(paths: &VerifyPaths, options: &CodecOptions) -> Result<Option<String>> {
    let reconstructed = reconstruct_from_files(paths, options)?;
    fs::write(&paths.reconstructed, &reconstructed)
        .map_err(CobsImgError::io(&paths.reconstructed))?;
    info!("Wrote reconstructed index to {}", paths.reconstructed.display());

    let original = fs::read(&paths.original).map_err(CobsImgError::io(&paths.original))?;
    Ok(first_difference(&original, &reconstructed))
}

/// Rebuilds the index from its artifacts and compares it with the original.
///
/// The reconstruction is written to `paths.reconstructed`. Returns `true`
/// only when it matches the original byte for byte.
///
/// # Errors
/// Returns an error if an input cannot be read or decoded, or if the
/// reconstruction cannot be written. A mismatch is not an error here; see
/// [`ensure_round_trip`].
pub fn verify(paths: &VerifyPaths, options: &CodecOptions) -> Result<bool> {
    let difference = check(paths, options)?;
    if let Some(detail) = &difference {
        warn!("Round-trip mismatch: {detail}");
    }
    Ok(difference.is_none())
}

/// Like [`verify`], but a mismatch is reported as
/// [`CobsImgError::IntegrityMismatch`].
///
/// # Errors
/// Returns [`CobsImgError::IntegrityMismatch`] if the reconstruction differs
/// from the original, or any error [`verify`] can return.
pub fn ensure_round_trip(paths: &VerifyPaths, options: &CodecOptions) -> Result<()> {
    match check(paths, options)? {
        None => Ok(()),
        Some(detail) => Err(CobsImgError::IntegrityMismatch {
            original: paths.original.clone(),
            reconstructed: paths.reconstructed.clone(),
            detail,
        }),
    }
}
