//! Lossless 1-bit PNG encoding of bit matrices.
//!
//! Pixel (r, c) of an encoded image is cell (r, c) of the matrix, with a set
//! bit stored as a white pixel (grayscale value 1). Because PNG packs 1-bit
//! scanlines most-significant bit first and every matrix row is a whole
//! number of bytes, the packed rows of a [`BitMatrix`] are written as
//! scanlines unchanged and read back unchanged.
//!
//! There is no implicit cap on image size. Callers that decode untrusted
//! images can set [`CodecOptions::pixel_limit`].

use std::fs;
use std::io::Cursor;
use std::path::Path;

use log::debug;

use crate::errors::{CobsImgError, Result};
use crate::matrix::BitMatrix;

/// File extension used for encoded images.
pub const IMAGE_EXTENSION: &str = "png";

/// PNG compression effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageCompression {
    /// Fastest encoding, larger files.
    Fast,
    /// The encoder's default trade-off.
    Balanced,
    /// Smallest files, slowest encoding.
    #[default]
    Best,
}

impl From<ImageCompression> for png::Compression {
    fn from(value: ImageCompression) -> Self {
        match value {
            ImageCompression::Fast => png::Compression::Fast,
            ImageCompression::Balanced => png::Compression::Default,
            ImageCompression::Best => png::Compression::Best,
        }
    }
}

/// Options shared by encoding and decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Compression effort used when encoding.
    pub compression: ImageCompression,
    /// Largest image, in pixels, that will be encoded or decoded. `None`
    /// accepts any size.
    pub pixel_limit: Option<u64>,
}

impl CodecOptions {
    fn check_pixel_limit(&self, width: u64, height: u64) -> Result<()> {
        match self.pixel_limit {
            Some(limit) if width.saturating_mul(height) > limit => {
                Err(CobsImgError::PixelLimitExceeded { width, height, limit })
            }
            _ => Ok(()),
        }
    }
}

fn png_dimension(value: usize, name: &str) -> Result<u32> {
    u32::try_from(value).ok().filter(|&v| v > 0 && v <= i32::MAX as u32).ok_or_else(|| {
        CobsImgError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("{value} is outside the PNG range 1..=2147483647"),
        }
    })
}

/// Encodes packed rows (`width / 8` bytes each) as a 1-bit grayscale PNG.
///
/// # Errors
/// Returns an error if the dimensions cannot be represented in PNG (zero rows
/// included), exceed the pixel limit, or if encoding fails.
pub fn encode_rows(rows: &[u8], width: usize, options: &CodecOptions) -> Result<Vec<u8>> {
    if width % 8 != 0 {
        return Err(CobsImgError::UnalignedWidth { width });
    }
    let row_bytes = width / 8;
    let height = if row_bytes == 0 { 0 } else { rows.len() / row_bytes };
    let png_width = png_dimension(width, "image width")?;
    let png_height = png_dimension(height, "image height")?;
    options.check_pixel_limit(u64::from(png_width), u64::from(png_height))?;

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, png_width, png_height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::One);
        encoder.set_compression(options.compression.into());
        // sub-byte depths compress best unfiltered
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rows)?;
        writer.finish()?;
    }
    debug!("Encoded {width}x{height} image into {} bytes", out.len());
    Ok(out)
}

/// Encodes a matrix as a 1-bit grayscale PNG.
///
/// # Errors
/// See [`encode_rows`].
pub fn encode(matrix: &BitMatrix, options: &CodecOptions) -> Result<Vec<u8>> {
    encode_rows(matrix.as_bytes(), matrix.width(), options)
}

/// Decodes a 1-bit grayscale PNG back into a matrix.
///
/// # Errors
/// Returns an error if the data is not a PNG, is not 1-bit grayscale, has a
/// width that is not a multiple of 8, or exceeds the pixel limit.
pub fn decode(bytes: &[u8], options: &CodecOptions) -> Result<BitMatrix> {
    let mut limits = png::Limits::default();
    limits.bytes = usize::MAX;
    let mut decoder = png::Decoder::new_with_limits(Cursor::new(bytes), limits);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    let (color_type, bit_depth) = (info.color_type, info.bit_depth);
    if color_type != png::ColorType::Grayscale || bit_depth != png::BitDepth::One {
        return Err(CobsImgError::InvalidFileFormat {
            file_type: "PNG image".to_string(),
            path: "<memory>".to_string(),
            reason: format!("expected 1-bit grayscale, found {color_type:?} at {bit_depth:?}"),
        });
    }
    options.check_pixel_limit(u64::from(width), u64::from(height))?;

    let width = width as usize;
    if width % 8 != 0 {
        return Err(CobsImgError::UnalignedWidth { width });
    }

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());
    debug!("Decoded {width}x{height} image ({} packed bytes)", buf.len());
    BitMatrix::from_packed_rows(buf, width)
}

/// Encodes `matrix` and writes it to `path`, returning the encoded size.
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn write_image<P: AsRef<Path>>(
    path: P,
    matrix: &BitMatrix,
    options: &CodecOptions,
) -> Result<u64> {
    write_encoded(path, &encode(matrix, options)?)
}

/// Writes already encoded image bytes to `path`, returning their size.
///
/// # Errors
/// Returns [`CobsImgError::Io`] if the file cannot be written.
pub fn write_encoded<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<u64> {
    let path = path.as_ref();
    fs::write(path, bytes).map_err(CobsImgError::io(path))?;
    Ok(bytes.len() as u64)
}

/// Reads and decodes the image at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded. Format errors name
/// the offending path.
pub fn read_image<P: AsRef<Path>>(path: P, options: &CodecOptions) -> Result<BitMatrix> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(CobsImgError::io(path))?;
    decode(&bytes, options).map_err(|e| match e {
        CobsImgError::InvalidFileFormat { file_type, reason, .. } => {
            CobsImgError::InvalidFileFormat { file_type, path: path.display().to_string(), reason }
        }
        CobsImgError::ImageDecode(source) => CobsImgError::InvalidFileFormat {
            file_type: "PNG image".to_string(),
            path: path.display().to_string(),
            reason: source.to_string(),
        },
        other => other,
    })
}
