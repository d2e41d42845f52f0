//! The `.cobs_header.metadata` record needed to undo padding.
//!
//! The file is line oriented, one `key = value` pair per line:
//!
//! ```text
//! BF_size = 128
//! width = 80
//! height = 2
//! ```
//!
//! `BF_size` (the payload bit count before padding) is always written first
//! and is the only key required for decoding. Other keys are informational.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::errors::{CobsImgError, Result};

/// Key holding the payload bit count before padding.
pub const BF_SIZE_KEY: &str = "BF_size";
/// Key holding the image width in pixels.
pub const WIDTH_KEY: &str = "width";
/// Key holding the image height in pixels.
pub const HEIGHT_KEY: &str = "height";

/// Values persisted alongside the compressed artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMetadata {
    /// Number of payload bits before padding.
    pub bf_size: u64,
    /// Row width the payload was packed with, if recorded.
    pub width: Option<u64>,
    /// Number of rows in the full image, if recorded.
    pub height: Option<u64>,
}

impl IndexMetadata {
    /// Metadata carrying only the required bit count.
    #[must_use]
    pub fn new(bf_size: u64) -> Self {
        Self { bf_size, width: None, height: None }
    }

    /// Adds the image dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u64, height: u64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Renders the metadata file contents.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!("{BF_SIZE_KEY} = {}\n", self.bf_size);
        if let Some(width) = self.width {
            let _ = writeln!(text, "{WIDTH_KEY} = {width}");
        }
        if let Some(height) = self.height {
            let _ = writeln!(text, "{HEIGHT_KEY} = {height}");
        }
        text
    }

    /// Parses metadata file contents; `source` names the file in errors.
    ///
    /// Only `BF_size` is strict: until the first well-formed `BF_size = N`
    /// line is seen, any line keyed `BF_size` must split on whitespace into
    /// exactly `BF_size`, `=`, and an unsigned integer. Later `BF_size` lines
    /// are ignored. `width` and `height` are taken from the first line that
    /// parses cleanly; any other line, including malformed or multi-word
    /// entries, is skipped.
    ///
    /// # Errors
    /// Returns [`CobsImgError::InvalidMetadata`] for a malformed `BF_size`
    /// line and [`CobsImgError::MetadataKeyMissing`] if `BF_size` is absent.
    ///
    /// # Example
    /// ```
    /// use cobsimg_lib::metadata::IndexMetadata;
    ///
    /// let meta = IndexMetadata::parse("BF_size = 128\ncreated_by = cobs 0.3\n", "example").unwrap();
    /// assert_eq!(meta.bf_size, 128);
    /// assert_eq!(meta.width, None);
    /// ```
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut bf_size = None;
        let mut width = None;
        let mut height = None;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            let Some(first) = line.split_whitespace().next() else {
                continue;
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            let pair = match fields.as_slice() {
                [key, "=", value] => Some((*key, *value)),
                _ => None,
            };

            if first.split(['=', ':']).next() == Some(BF_SIZE_KEY) {
                if bf_size.is_some() {
                    continue;
                }
                let invalid = |reason: String| CobsImgError::InvalidMetadata {
                    path: source.to_string(),
                    line: line_no + 1,
                    reason,
                };
                let Some((BF_SIZE_KEY, value)) = pair else {
                    return Err(invalid(format!("expected '{BF_SIZE_KEY} = value', got '{line}'")));
                };
                let value = value
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("bad value for {BF_SIZE_KEY}: {e}")))?;
                bf_size = Some(value);
                continue;
            }

            let Some((key, value)) = pair else {
                log::debug!("Skipping line {} of {source}: '{line}'", line_no + 1);
                continue;
            };
            let slot = match key {
                WIDTH_KEY => &mut width,
                HEIGHT_KEY => &mut height,
                _ => continue,
            };
            if slot.is_none() {
                match value.parse::<u64>() {
                    Ok(v) => *slot = Some(v),
                    Err(e) => log::warn!("Ignoring {key} on line {} of {source}: {e}", line_no + 1),
                }
            }
        }

        let bf_size = bf_size.ok_or_else(|| CobsImgError::MetadataKeyMissing {
            key: BF_SIZE_KEY.to_string(),
            path: source.to_string(),
        })?;
        Ok(Self { bf_size, width, height })
    }

    /// Writes the metadata to `path`.
    ///
    /// # Errors
    /// Returns [`CobsImgError::Io`] if the file cannot be written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(CobsImgError::io(path))
    }

    /// Reads and parses metadata from `path`.
    ///
    /// # Errors
    /// Returns [`CobsImgError::Io`] if the file cannot be read, otherwise see
    /// [`IndexMetadata::parse`].
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(CobsImgError::io(path))?;
        Self::parse(&text, &path.display().to_string())
    }

    /// The bit count as a `usize`.
    ///
    /// # Errors
    /// Returns an error if the value does not fit in memory on this platform.
    pub fn bf_size_bits(&self) -> Result<usize> {
        usize::try_from(self.bf_size).map_err(|_| CobsImgError::InvalidParameter {
            parameter: BF_SIZE_KEY.to_string(),
            reason: format!("{} does not fit in usize", self.bf_size),
        })
    }
}
