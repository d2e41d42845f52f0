//! Bit matrices built from bloom-filter payloads.
//!
//! A [`BitMatrix`] is a rectangular grid of bits with a fixed row width. Rows
//! are stored as packed bytes in the order defined by [`crate::bits`], which
//! requires the width to be a multiple of 8: each row is exactly `width / 8`
//! bytes and the packed storage of the whole matrix is the payload itself
//! followed by zero padding.
//!
//! Memory usage is one bit per cell, i.e. the payload size plus at most one
//! row of padding.

use std::ops::Range;

use crate::bits;
use crate::errors::{CobsImgError, Result};

/// A row-major grid of bits whose width is a multiple of 8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    /// Packed rows, `width / 8` bytes each.
    data: Vec<u8>,
    /// Number of columns (bits per row).
    width: usize,
    /// Number of rows.
    rows: usize,
}

/// Output of [`pack`]: the padded matrix and the unpadded bit count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedPayload {
    /// The zero-padded matrix.
    pub matrix: BitMatrix,
    /// Number of payload bits before padding (`8 * payload.len()`).
    pub original_bit_count: usize,
}

impl PackedPayload {
    /// Number of zero bits appended to fill the last row.
    #[must_use]
    pub fn padding_bits(&self) -> usize {
        self.matrix.len_bits() - self.original_bit_count
    }
}

/// Checks that `width` is usable as a row width.
///
/// # Errors
/// Returns [`CobsImgError::InvalidParameter`] for a zero width and
/// [`CobsImgError::UnalignedWidth`] if `width` is not a multiple of 8.
pub fn validate_width(width: usize) -> Result<()> {
    if width == 0 {
        return Err(CobsImgError::InvalidParameter {
            parameter: "width".to_string(),
            reason: "Must be positive (> 0), got: 0".to_string(),
        });
    }
    if width % 8 != 0 {
        return Err(CobsImgError::UnalignedWidth { width });
    }
    Ok(())
}

/// Lays `payload` out as a matrix of `width` bits per row.
///
/// Bits are taken most-significant first from each byte. The last row is
/// padded with zero bits so that `rows = ceil(8 * payload.len() / width)`.
///
/// # Errors
/// Returns [`CobsImgError::UnalignedWidth`] if `width % 8 != 0`, and
/// [`CobsImgError::InvalidParameter`] if `width` is zero. Both are checked
/// before any data is copied.
///
/// # Example
/// ```
/// use cobsimg_lib::matrix::pack;
///
/// let packed = pack(&[0xFF; 16], 80).unwrap();
/// assert_eq!(packed.matrix.rows(), 2);
/// assert_eq!(packed.original_bit_count, 128);
/// assert_eq!(packed.padding_bits(), 32);
/// ```
pub fn pack(payload: &[u8], width: usize) -> Result<PackedPayload> {
    validate_width(width)?;

    let original_bit_count = payload.len() * 8;
    let rows = original_bit_count.div_ceil(width);
    let mut data = Vec::with_capacity(rows * width / 8);
    data.extend_from_slice(payload);
    data.resize(rows * width / 8, 0);

    Ok(PackedPayload { matrix: BitMatrix { data, width, rows }, original_bit_count })
}

impl BitMatrix {
    /// Wraps packed row bytes as a matrix.
    ///
    /// # Errors
    /// Returns an error if `width` is invalid or `data` is not a whole number
    /// of rows.
    pub fn from_packed_rows(data: Vec<u8>, width: usize) -> Result<Self> {
        validate_width(width)?;
        let row_bytes = width / 8;
        if data.len() % row_bytes != 0 {
            return Err(CobsImgError::InvalidParameter {
                parameter: "data".to_string(),
                reason: format!(
                    "{} bytes is not a whole number of {row_bytes}-byte rows",
                    data.len()
                ),
            });
        }
        let rows = data.len() / row_bytes;
        Ok(Self { data, width, rows })
    }

    /// Builds a matrix from a row-major boolean grid.
    ///
    /// # Errors
    /// Returns an error if `width` is invalid or `bits.len()` is not a
    /// multiple of `width`.
    pub fn from_bits(bits: &[bool], width: usize) -> Result<Self> {
        validate_width(width)?;
        if bits.len() % width != 0 {
            return Err(CobsImgError::InvalidParameter {
                parameter: "bits".to_string(),
                reason: format!("{} bits is not a whole number of rows of {width}", bits.len()),
            });
        }
        Self::from_packed_rows(bits::pack_bits(bits), width)
    }

    /// Stacks matrices of equal width top to bottom.
    ///
    /// # Errors
    /// Returns an error if `parts` is empty or the widths differ.
    pub fn concat(parts: &[BitMatrix]) -> Result<Self> {
        let Some(first) = parts.first() else {
            return Err(CobsImgError::InvalidParameter {
                parameter: "parts".to_string(),
                reason: "at least one matrix is required".to_string(),
            });
        };
        let width = first.width;
        if let Some(other) = parts.iter().find(|p| p.width != width) {
            return Err(CobsImgError::InvalidParameter {
                parameter: "parts".to_string(),
                reason: format!("width mismatch: {} vs {}", width, other.width),
            });
        }

        let mut data = Vec::with_capacity(parts.iter().map(|p| p.data.len()).sum());
        for part in parts {
            data.extend_from_slice(&part.data);
        }
        let rows = parts.iter().map(|p| p.rows).sum();
        Ok(Self { data, width, rows })
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Bytes per packed row.
    #[inline]
    #[must_use]
    pub const fn row_bytes(&self) -> usize {
        self.width / 8
    }

    /// Total number of cells, `rows * width`.
    #[inline]
    #[must_use]
    pub const fn len_bits(&self) -> usize {
        self.rows * self.width
    }

    /// Whether the matrix has no rows.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the bit at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.width, "({row}, {col}) out of bounds");
        bits::bit_at(&self.data, row * self.width + col)
    }

    /// Packed bytes of a single row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        let n = self.row_bytes();
        &self.data[row * n..(row + 1) * n]
    }

    /// Packed bytes of a contiguous range of rows.
    #[must_use]
    pub fn row_range(&self, rows: Range<usize>) -> &[u8] {
        let n = self.row_bytes();
        &self.data[rows.start * n..rows.end * n]
    }

    /// All rows as packed bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the matrix, returning its packed rows.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Flattens the matrix row-major and repacks its first `n_bits` bits.
    ///
    /// This is how padding is stripped before reconstructing a payload.
    #[must_use]
    pub fn take_bits(&self, n_bits: usize) -> Vec<u8> {
        bits::take_bits(&self.data, n_bits)
    }

    /// Expands the matrix into a row-major boolean grid.
    #[must_use]
    pub fn to_bits(&self) -> Vec<bool> {
        bits::unpack_bits(&self.data)
    }
}
