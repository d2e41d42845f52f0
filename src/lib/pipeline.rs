//! End-to-end compression and decompression of a COBS classic index.
//!
//! [`compress_index`] runs the whole pipeline for one input file:
//!
//! 1. copy the input into the output directory
//! 2. split off and write the header
//! 3. pack the payload into a bit matrix and write the full image
//! 4. write the metadata
//! 5. write the transposed matrix
//! 6. rebuild the index from the full image and check it against the input
//! 7. write the batch images
//! 8. write the metrics
//!
//! Parameters are checked before anything is written, and the run stops at
//! the first failure.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::artifacts::ArtifactPaths;
use crate::batch::{self, WrittenBatch};
use crate::errors::{CobsImgError, Result};
use crate::header::{self, SplitIndex};
use crate::image::{self, CodecOptions};
use crate::logging::{OperationTimer, format_bytes, format_count, log_compression_summary};
use crate::matrix::{self, BitMatrix};
use crate::metadata::IndexMetadata;
use crate::metrics::{CompressionMetrics, write_metrics_auto};
use crate::transpose;
use crate::validation::{validate_file_exists, validate_output_dir_absent, validate_positive};
use crate::verify::{self, VerifyPaths};

/// Default image width in pixels.
pub const DEFAULT_WIDTH: usize = 4000;

/// Default number of rows per batch image.
pub const DEFAULT_ROWS_PER_BATCH: usize = 50_000;

/// Settings for [`compress_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Row width in bits; must be a positive multiple of 8.
    pub width: usize,
    /// Maximum number of rows in one batch image.
    pub rows_per_batch: usize,
    /// Image codec settings.
    pub codec: CodecOptions,
    /// Worker threads for transposition and batch encoding.
    pub threads: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            rows_per_batch: DEFAULT_ROWS_PER_BATCH,
            codec: CodecOptions::default(),
            threads: 1,
        }
    }
}

impl CompressOptions {
    /// Checks every setting.
    ///
    /// # Errors
    /// Returns [`CobsImgError::UnalignedWidth`] for a width that is not a
    /// multiple of 8, or [`CobsImgError::InvalidParameter`] for a zero width,
    /// batch height or thread count.
    pub fn validate(&self) -> Result<()> {
        matrix::validate_width(self.width)?;
        batch::validate_rows_per_batch(self.rows_per_batch)?;
        validate_positive(self.threads, "threads")
    }
}

/// Everything produced by one successful [`compress_index`] run.
#[derive(Debug, Clone)]
pub struct CompressionSummary {
    /// Where each artifact was written.
    pub artifacts: ArtifactPaths,
    /// The batch images, in index order.
    pub batches: Vec<WrittenBatch>,
    /// Size accounting, as written to the metrics file.
    pub metrics: CompressionMetrics,
}

fn build_pool(threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new().num_threads(threads).build().map_err(|e| {
        CobsImgError::InvalidParameter {
            parameter: "threads".to_string(),
            reason: format!("could not start {threads} worker threads: {e}"),
        }
    })
}

fn split_non_empty<'a>(index: &'a [u8], input: &Path) -> Result<SplitIndex<'a>> {
    let split = header::split_classic_index(index)?;
    if split.payload.is_empty() {
        return Err(CobsImgError::InvalidFileFormat {
            file_type: "COBS index".to_string(),
            path: input.display().to_string(),
            reason: "no bloom filter data follows the second CLASSIC_INDEX marker".to_string(),
        });
    }
    Ok(split)
}

/// Compresses the index at `input` into a new directory `output_dir`.
///
/// # Errors
/// Returns an error if a setting is invalid, the input is missing or not a
/// classic index, `output_dir` already exists, any artifact cannot be
/// written, or the round-trip check fails
/// ([`CobsImgError::IntegrityMismatch`]).
pub fn compress_index<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &CompressOptions,
) -> Result<CompressionSummary> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    options.validate()?;
    validate_file_exists(input, "Input index")?;
    validate_output_dir_absent(output_dir)?;
    let artifacts = ArtifactPaths::for_input(input, output_dir)?;

    let index = fs::read(input).map_err(CobsImgError::io(input))?;
    let split = split_non_empty(&index, input)?;
    info!(
        "Read {} from {}: {} header, {} payload",
        format_bytes(index.len() as u64),
        input.display(),
        format_bytes(split.header.len() as u64),
        format_bytes(split.payload.len() as u64)
    );

    fs::create_dir_all(output_dir).map_err(CobsImgError::io(output_dir))?;
    let pool = build_pool(options.threads)?;
    pool.install(|| run(input, &split, index.len(), artifacts, options))
}

/// Paths for checking the full image against the source index.
///
/// The reconstruction is compared with `input` itself, not the copy in the
/// output directory, so a faulty copy is also caught.
fn round_trip_paths(input: &Path, artifacts: &ArtifactPaths) -> VerifyPaths {
    VerifyPaths::new(
        artifacts.full_image(),
        artifacts.header(),
        artifacts.metadata(),
        input.to_path_buf(),
    )
    .with_reconstructed(artifacts.reconstructed())
}

fn run(
    input: &Path,
    split: &SplitIndex<'_>,
    index_len: usize,
    artifacts: ArtifactPaths,
    options: &CompressOptions,
) -> Result<CompressionSummary> {
    let timer = OperationTimer::new("Compressing index");
    let mut metrics = CompressionMetrics::new(artifacts.name());
    metrics.index_bytes = index_len as u64;
    metrics.header_bytes = split.header.len() as u64;
    metrics.payload_bytes = split.payload.len() as u64;

    let copy = artifacts.input_copy();
    fs::copy(input, &copy).map_err(CobsImgError::io(&copy))?;

    let header_path = artifacts.header();
    fs::write(&header_path, split.header).map_err(CobsImgError::io(&header_path))?;

    let packed = matrix::pack(split.payload, options.width)?;
    let matrix = &packed.matrix;
    metrics.bf_size = packed.original_bit_count as u64;
    metrics.width = matrix.width() as u64;
    metrics.height = matrix.rows() as u64;
    metrics.padding_bits = packed.padding_bits() as u64;
    info!(
        "Packed {} bits into {} x {} pixels with {} padding bits",
        format_count(metrics.bf_size),
        format_count(metrics.width),
        format_count(metrics.height),
        format_count(metrics.padding_bits)
    );

    metrics.image_bytes = image::write_image(artifacts.full_image(), matrix, &options.codec)?;
    info!(
        "Wrote full image ({}) to {}",
        format_bytes(metrics.image_bytes),
        artifacts.full_image().display()
    );

    IndexMetadata::new(metrics.bf_size)
        .with_dimensions(metrics.width, metrics.height)
        .write(artifacts.metadata())?;

    let transposed = transpose::transpose_and_pack(matrix);
    let transposed_path = artifacts.transposed();
    fs::write(&transposed_path, &transposed).map_err(CobsImgError::io(&transposed_path))?;
    metrics.transposed_bytes = transposed.len() as u64;
    drop(transposed);

    let verify_paths = round_trip_paths(input, &artifacts);
    verify::ensure_round_trip(&verify_paths, &options.codec)?;
    metrics.verified = true;
    info!("Round trip verified against {}", verify_paths.original.display());

    let batches = batch::write_batches(matrix, options.rows_per_batch, &options.codec, |i| {
        artifacts.batch_image(i)
    })?;
    metrics.batch_count = batches.len() as u64;
    metrics.batch_bytes = batches.iter().map(|b| b.bytes).sum();

    metrics.update_ratio();
    write_metrics_auto(artifacts.metrics(), std::slice::from_ref(&metrics))?;
    log_compression_summary(&metrics);
    timer.log_completion(metrics.payload_bytes);

    Ok(CompressionSummary { artifacts, batches, metrics })
}

/// Rebuilds an index from its header, metadata and one or more images.
///
/// `images` holds either the single full image or the batch images in index
/// order; their rows are concatenated before truncation to `BF_size` bits.
/// Returns the number of bytes written to `output`.
///
/// # Errors
/// Returns an error if no image is given, an input cannot be read or
/// decoded, the images differ in width, or `output` cannot be written.
pub fn decompress_index<P: AsRef<Path>>(
    images: &[P],
    header: &Path,
    metadata: &Path,
    output: &Path,
    codec: &CodecOptions,
) -> Result<u64> {
    if images.is_empty() {
        return Err(CobsImgError::InvalidParameter {
            parameter: "image".to_string(),
            reason: "at least one image is required".to_string(),
        });
    }

    let metadata = IndexMetadata::read(metadata)?;
    let header = fs::read(header).map_err(CobsImgError::io(header))?;
    let parts =
        images.iter().map(|p| image::read_image(p, codec)).collect::<Result<Vec<BitMatrix>>>()?;
    let matrix = batch::reassemble(&parts)?;
    info!(
        "Decoded {} image(s) into {} x {} pixels",
        parts.len(),
        format_count(matrix.width() as u64),
        format_count(matrix.rows() as u64)
    );

    let source = images
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let index = verify::reconstruct(&header, &matrix, &metadata, &source)?;
    fs::write(output, &index).map_err(CobsImgError::io(output))?;
    info!("Wrote {} to {}", format_bytes(index.len() as u64), output.display());
    Ok(index.len() as u64)
}

/// Paths of the batch images in `artifacts`, in index order.
#[must_use]
pub fn batch_paths(artifacts: &ArtifactPaths, batches: &[WrittenBatch]) -> Vec<PathBuf> {
    batches.iter().map(|b| artifacts.batch_image(b.index)).collect()
}
