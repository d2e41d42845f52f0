//! Splitting a matrix into row-range batches encoded as separate images.
//!
//! Batch `i` covers rows `[i * rows_per_batch, min((i + 1) * rows_per_batch, rows))`
//! at full width. Concatenating the batches in index order gives back the
//! full matrix; only the last batch may be shorter than `rows_per_batch`.

use std::ops::Range;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::errors::{CobsImgError, Result};
use crate::image::{self, CodecOptions};
use crate::matrix::BitMatrix;
use crate::progress::BatchProgress;

/// A borrowed row range of a matrix.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Position of this batch in the sequence, starting at 0.
    pub index: usize,
    /// First row (inclusive) covered by this batch.
    pub start_row: usize,
    /// Last row (exclusive) covered by this batch.
    pub end_row: usize,
    matrix: &'a BitMatrix,
}

impl Batch<'_> {
    /// Rows covered by this batch.
    #[must_use]
    pub fn row_range(&self) -> Range<usize> {
        self.start_row..self.end_row
    }

    /// Number of rows in this batch.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.end_row - self.start_row
    }

    /// Packed bytes of the covered rows.
    #[must_use]
    pub fn packed_rows(&self) -> &[u8] {
        self.matrix.row_range(self.row_range())
    }

    /// Copies the covered rows into a standalone matrix.
    ///
    /// # Errors
    /// Never fails for batches produced by [`BatchSplitter`].
    pub fn to_matrix(&self) -> Result<BitMatrix> {
        BitMatrix::from_packed_rows(self.packed_rows().to_vec(), self.matrix.width())
    }

    /// Encodes the covered rows as an independent image.
    ///
    /// # Errors
    /// See [`image::encode_rows`].
    pub fn encode(&self, options: &CodecOptions) -> Result<Vec<u8>> {
        image::encode_rows(self.packed_rows(), self.matrix.width(), options)
    }
}

/// Lazily yields the batches of a matrix in index order.
#[derive(Debug, Clone)]
pub struct BatchSplitter<'a> {
    matrix: &'a BitMatrix,
    rows_per_batch: usize,
    next_index: usize,
}

impl<'a> BatchSplitter<'a> {
    /// Creates a splitter producing batches of at most `rows_per_batch` rows.
    ///
    /// # Errors
    /// Returns [`CobsImgError::InvalidParameter`] if `rows_per_batch` is zero.
    pub fn new(matrix: &'a BitMatrix, rows_per_batch: usize) -> Result<Self> {
        validate_rows_per_batch(rows_per_batch)?;
        Ok(Self { matrix, rows_per_batch, next_index: 0 })
    }

    /// Total number of batches, `ceil(rows / rows_per_batch)`.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.matrix.rows().div_ceil(self.rows_per_batch)
    }

    fn batch(&self, index: usize) -> Batch<'a> {
        let start_row = index * self.rows_per_batch;
        let end_row = (start_row + self.rows_per_batch).min(self.matrix.rows());
        Batch { index, start_row, end_row, matrix: self.matrix }
    }
}

impl<'a> Iterator for BatchSplitter<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.batch_count() {
            return None;
        }
        let batch = self.batch(self.next_index);
        self.next_index += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batch_count().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchSplitter<'_> {}

/// Checks that a batch height is usable.
///
/// # Errors
/// Returns [`CobsImgError::InvalidParameter`] if `rows_per_batch` is zero.
pub fn validate_rows_per_batch(rows_per_batch: usize) -> Result<()> {
    if rows_per_batch == 0 {
        return Err(CobsImgError::InvalidParameter {
            parameter: "rows-per-batch".to_string(),
            reason: "Must be positive (> 0), got: 0".to_string(),
        });
    }
    Ok(())
}

/// Lazily splits `matrix` into batches of at most `rows_per_batch` rows.
///
/// # Errors
/// Returns [`CobsImgError::InvalidParameter`] if `rows_per_batch` is zero.
///
/// # Example
/// ```
/// use cobsimg_lib::batch::split;
/// use cobsimg_lib::matrix::pack;
///
/// let matrix = pack(&[0u8; 16], 8).unwrap().matrix;
/// let rows: Vec<_> = split(&matrix, 3).unwrap().map(|b| b.rows()).collect();
/// assert_eq!(rows, vec![3, 3, 3, 3, 3, 1]);
/// ```
pub fn split(matrix: &BitMatrix, rows_per_batch: usize) -> Result<BatchSplitter<'_>> {
    BatchSplitter::new(matrix, rows_per_batch)
}

/// Lazily encodes each batch of `matrix` as an independent image.
///
/// # Errors
/// Returns [`CobsImgError::InvalidParameter`] up front if `rows_per_batch` is
/// zero; encoding errors are yielded per batch.
pub fn split_and_encode<'a>(
    matrix: &'a BitMatrix,
    rows_per_batch: usize,
    options: &'a CodecOptions,
) -> Result<impl Iterator<Item = Result<Vec<u8>>> + 'a> {
    Ok(split(matrix, rows_per_batch)?.map(move |batch| batch.encode(options)))
}

/// A batch image that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBatch {
    /// Batch index.
    pub index: usize,
    /// Rows covered by the batch.
    pub rows: Range<usize>,
    /// Where the image was written.
    pub path: PathBuf,
    /// Encoded size in bytes.
    pub bytes: u64,
}

/// Encodes every batch and writes batch `i` to `path_for(i)`.
///
/// Batches are encoded on the current rayon thread pool; each batch goes to
/// its own pre-determined path, so the result does not depend on the order
/// in which workers finish. The returned list is in index order.
///
/// # Errors
/// Returns the first error encountered while encoding or writing.
pub fn write_batches<F>(
    matrix: &BitMatrix,
    rows_per_batch: usize,
    options: &CodecOptions,
    path_for: F,
) -> Result<Vec<WrittenBatch>>
where
    F: Fn(usize) -> PathBuf + Sync,
{
    let splitter = split(matrix, rows_per_batch)?;
    let progress = BatchProgress::new(splitter.len() as u64);
    let batches: Vec<Batch<'_>> = splitter.collect();

    let written = batches
        .par_iter()
        .map(|batch| -> Result<WrittenBatch> {
            let path = path_for(batch.index);
            log::debug!(
                "Encoding batch {} (rows {}..{}) to {}",
                batch.index,
                batch.start_row,
                batch.end_row,
                path.display()
            );
            let bytes = image::write_encoded(&path, &batch.encode(options)?)?;
            progress.record(batch.rows() as u64, bytes);
            Ok(WrittenBatch { index: batch.index, rows: batch.row_range(), path, bytes })
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();
    Ok(written)
}

/// Reassembles a matrix from its batches given in index order.
///
/// # Errors
/// Returns an error if no batches are given or their widths differ.
pub fn reassemble(batches: &[BitMatrix]) -> Result<BitMatrix> {
    BitMatrix::concat(batches)
}
