//! Names of the files produced for one compressed index.
//!
//! For an input named `X` and output directory `D`:
//!
//! | Artifact                 | Path                             |
//! |--------------------------|----------------------------------|
//! | copy of the input        | `D/X`                            |
//! | header blob              | `D/X.cobs_header.bin`            |
//! | metadata                 | `D/X.cobs_header.metadata`       |
//! | full image               | `D/X.all.png`                    |
//! | batch `i`                | `D/X.all.part_<i>.png`           |
//! | transposed matrix        | `D/X.bf_matrix.transposed`       |
//! | reconstructed index      | `D/X.decompressed`               |
//! | metrics                  | `D/X.compression_metrics.txt`    |

use std::path::{Path, PathBuf};

use crate::errors::{CobsImgError, Result};
use crate::image::IMAGE_EXTENSION;
use crate::verify::RECONSTRUCTED_SUFFIX;

/// Output paths for a single input index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    output_dir: PathBuf,
    name: String,
}

impl ArtifactPaths {
    /// Artifact paths for `input` written under `output_dir`.
    ///
    /// # Errors
    /// Returns an error if `input` has no UTF-8 file name.
    pub fn for_input<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<Self> {
        let input = input.as_ref();
        let name = input.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            CobsImgError::InvalidParameter {
                parameter: "input".to_string(),
                reason: format!("'{}' has no usable file name", input.display()),
            }
        })?;
        Ok(Self { output_dir: output_dir.as_ref().to_path_buf(), name: name.to_string() })
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}{suffix}", self.name))
    }

    /// The input's file name, `X`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output directory, `D`.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `D/X`
    #[must_use]
    pub fn input_copy(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }

    /// `D/X.cobs_header.bin`
    #[must_use]
    pub fn header(&self) -> PathBuf {
        self.with_suffix(".cobs_header.bin")
    }

    /// `D/X.cobs_header.metadata`
    #[must_use]
    pub fn metadata(&self) -> PathBuf {
        self.with_suffix(".cobs_header.metadata")
    }

    /// `D/X.all.png`
    #[must_use]
    pub fn full_image(&self) -> PathBuf {
        self.with_suffix(&format!(".all.{IMAGE_EXTENSION}"))
    }

    /// `D/X.all.part_<index>.png`
    #[must_use]
    pub fn batch_image(&self, index: usize) -> PathBuf {
        self.with_suffix(&format!(".all.part_{index}.{IMAGE_EXTENSION}"))
    }

    /// `D/X.bf_matrix.transposed`
    #[must_use]
    pub fn transposed(&self) -> PathBuf {
        self.with_suffix(".bf_matrix.transposed")
    }

    /// `D/X.decompressed`
    #[must_use]
    pub fn reconstructed(&self) -> PathBuf {
        self.with_suffix(RECONSTRUCTED_SUFFIX)
    }

    /// `D/X.compression_metrics.txt`
    #[must_use]
    pub fn metrics(&self) -> PathBuf {
        self.with_suffix(".compression_metrics.txt")
    }
}
