//! Column-major packing of a bit matrix.
//!
//! The transposed artifact stores column 0 (all rows, top to bottom), then
//! column 1, and so on, packed 8 bits per byte MSB-first with a zero-filled
//! final byte. Consumers that query one sample (column) across all bloom
//! filter rows read a contiguous bit range.

use rayon::prelude::*;

use crate::bits::{self, BitWriter};
use crate::errors::{CobsImgError, Result};
use crate::matrix::BitMatrix;

/// Transposes `matrix` (rows × width) to width × rows and packs it.
///
/// Every run of 8 consecutive columns produces exactly `rows` bytes, so these
/// column groups are packed in parallel on the current rayon pool.
///
/// # Example
/// ```
/// use cobsimg_lib::matrix::pack;
/// use cobsimg_lib::transpose::transpose_and_pack;
///
/// // two rows: 1000_0000 and 0000_0001
/// let matrix = pack(&[0x80, 0x01], 8).unwrap().matrix;
/// // columns: [1,0], [0,0] x6, [0,1]
/// assert_eq!(transpose_and_pack(&matrix), vec![0b1000_0000, 0b0000_0001]);
/// ```
#[must_use]
pub fn transpose_and_pack(matrix: &BitMatrix) -> Vec<u8> {
    let rows = matrix.rows();
    let width = matrix.width();
    let mut out = vec![0u8; bits::bytes_for_bits(rows * width)];
    if rows == 0 {
        return out;
    }

    out.par_chunks_mut(rows).enumerate().for_each(|(group, chunk)| {
        let first_col = group * 8;
        for (offset, col) in (first_col..first_col + 8).enumerate() {
            for row in 0..rows {
                if matrix.get(row, col) {
                    bits::set_bit(chunk, offset * rows + row, true);
                }
            }
        }
    });
    out
}

/// Rebuilds the original matrix from a transposed artifact.
///
/// `width` and `rows` are the dimensions of the original (untransposed)
/// matrix.
///
/// # Errors
/// Returns an error if `bytes` is too short for the given dimensions or if
/// `width` is not a valid row width.
pub fn unpack_transposed(bytes: &[u8], width: usize, rows: usize) -> Result<BitMatrix> {
    let n_bits = width * rows;
    if bytes.len() < bits::bytes_for_bits(n_bits) {
        return Err(CobsImgError::InvalidParameter {
            parameter: "transposed".to_string(),
            reason: format!(
                "{} bytes cannot hold a {width}x{rows} matrix ({n_bits} bits)",
                bytes.len()
            ),
        });
    }

    let mut writer = BitWriter::with_capacity(n_bits);
    for row in 0..rows {
        for col in 0..width {
            writer.push(bits::bit_at(bytes, col * rows + row));
        }
    }
    BitMatrix::from_packed_rows(writer.into_bytes(), width)
}
