//! Splitting a COBS classic index into its header and bloom-filter payload.
//!
//! A classic index starts with the ASCII marker `CLASSIC_INDEX`, carries its
//! header fields, repeats the marker, and is followed by the bit-packed bloom
//! filter matrix. Everything up to and including the second marker is the
//! header; everything after it is the payload.

use memchr::memmem;

use crate::errors::{CobsImgError, Result};

/// Marker delimiting the header of a COBS classic index.
pub const CLASSIC_INDEX_MARKER: &[u8] = b"CLASSIC_INDEX";

/// A classic index split at the end of its second marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitIndex<'a> {
    /// Bytes up to and including the second marker.
    pub header: &'a [u8],
    /// Bloom-filter bytes following the header.
    pub payload: &'a [u8],
}

impl SplitIndex<'_> {
    /// Offset of the first payload byte in the original index.
    #[must_use]
    pub fn split_point(&self) -> usize {
        self.header.len()
    }

    /// Number of payload bits before any padding.
    #[must_use]
    pub fn payload_bits(&self) -> usize {
        self.payload.len() * 8
    }
}

/// Splits `index` after the second occurrence of `marker`.
///
/// The second occurrence is searched starting one byte after the start of the
/// first, so two adjacent markers are both found.
///
/// # Errors
/// Returns [`CobsImgError::MarkerNotFound`] if either occurrence is missing.
///
/// # Example
/// ```
/// use cobsimg_lib::header::{split_index, CLASSIC_INDEX_MARKER};
///
/// let index = b"CLASSIC_INDEX\x01\x02CLASSIC_INDEX\xAB\xCD";
/// let split = split_index(index, CLASSIC_INDEX_MARKER).unwrap();
/// assert_eq!(split.payload, &[0xAB, 0xCD]);
/// assert_eq!(split.split_point(), 28);
/// ```
pub fn split_index<'a>(index: &'a [u8], marker: &[u8]) -> Result<SplitIndex<'a>> {
    let not_found = |occurrence| CobsImgError::MarkerNotFound {
        marker: String::from_utf8_lossy(marker).into_owned(),
        occurrence,
    };

    let first = memmem::find(index, marker).ok_or_else(|| not_found("first"))?;
    let second = memmem::find(&index[first + 1..], marker)
        .map(|offset| first + 1 + offset)
        .ok_or_else(|| not_found("second"))?;

    let (header, payload) = index.split_at(second + marker.len());
    Ok(SplitIndex { header, payload })
}

/// Splits a COBS classic index using [`CLASSIC_INDEX_MARKER`].
///
/// # Errors
/// Returns [`CobsImgError::MarkerNotFound`] if the index is not a classic index.
pub fn split_classic_index(index: &[u8]) -> Result<SplitIndex<'_>> {
    split_index(index, CLASSIC_INDEX_MARKER)
}
