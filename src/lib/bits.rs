//! Bit-order primitives shared by every component that packs or unpacks bits.
//!
//! All bit indexing in cobsimg is most-significant-bit first: logical bit 0 is
//! bit 7 of byte 0, logical bit 8 is bit 7 of byte 1, and so on. This is the
//! same order PNG uses for 1-bit scanlines, which means a byte-aligned row of
//! payload bytes is already a valid scanline.

/// Mask selecting logical bit `i` within its byte.
#[inline]
const fn mask(i: usize) -> u8 {
    0x80 >> (i % 8)
}

/// Returns logical bit `i` of `bytes`.
///
/// # Panics
/// Panics if `i / 8` is out of bounds.
#[inline]
#[must_use]
pub fn bit_at(bytes: &[u8], i: usize) -> bool {
    bytes[i / 8] & mask(i) != 0
}

/// Sets logical bit `i` of `bytes` to `value`.
///
/// # Panics
/// Panics if `i / 8` is out of bounds.
#[inline]
pub fn set_bit(bytes: &mut [u8], i: usize, value: bool) {
    if value {
        bytes[i / 8] |= mask(i);
    } else {
        bytes[i / 8] &= !mask(i);
    }
}

/// Number of bytes needed to hold `n_bits` bits.
#[inline]
#[must_use]
pub const fn bytes_for_bits(n_bits: usize) -> usize {
    n_bits.div_ceil(8)
}

/// Expands packed bytes into one `bool` per bit.
///
/// # Example
/// ```
/// use cobsimg_lib::bits::unpack_bits;
///
/// let bits = unpack_bits(&[0b1000_0001]);
/// assert_eq!(bits, vec![true, false, false, false, false, false, false, true]);
/// ```
#[must_use]
pub fn unpack_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Packs `bool`s into bytes, 8 per byte.
///
/// A trailing partial byte is filled with zero bits.
///
/// # Example
/// ```
/// use cobsimg_lib::bits::pack_bits;
///
/// assert_eq!(pack_bits(&[true, true, false]), vec![0b1100_0000]);
/// ```
#[must_use]
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len());
    for &bit in bits {
        writer.push(bit);
    }
    writer.into_bytes()
}

/// Repacks the first `n_bits` bits of `bytes`, dropping everything after them.
///
/// Equivalent to `pack_bits(&unpack_bits(bytes)[..n_bits])` without the
/// intermediate expansion. If `bytes` holds fewer than `n_bits` bits, all of
/// `bytes` is returned.
///
/// # Example
/// ```
/// use cobsimg_lib::bits::take_bits;
///
/// assert_eq!(take_bits(&[0xFF, 0xFF], 12), vec![0xFF, 0xF0]);
/// assert_eq!(take_bits(&[0xAB, 0xCD, 0x00], 16), vec![0xAB, 0xCD]);
/// ```
#[must_use]
pub fn take_bits(bytes: &[u8], n_bits: usize) -> Vec<u8> {
    let n_bytes = bytes_for_bits(n_bits).min(bytes.len());
    let mut out = bytes[..n_bytes].to_vec();
    let tail = n_bits % 8;
    if tail != 0 && n_bytes == bytes_for_bits(n_bits) {
        if let Some(last) = out.last_mut() {
            *last &= !(0xFFu8 >> tail);
        }
    }
    out
}

/// Appends bits MSB-first into a growing byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `n_bits` bits.
    #[must_use]
    pub fn with_capacity(n_bits: usize) -> Self {
        Self { bytes: Vec::with_capacity(bytes_for_bits(n_bits)), len: 0 }
    }

    /// Appends one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= mask(self.len);
        }
        self.len += 1;
    }

    /// Number of bits written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bits have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the writer, returning the packed bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
