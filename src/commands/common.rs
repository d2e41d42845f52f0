//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use clap::{Args, ValueEnum};

use cobsimg_lib::image::{CodecOptions, ImageCompression};
use cobsimg_lib::validation::validate_positive;

/// PNG compression effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CompressionLevel {
    /// Fastest encoding, largest files.
    Fast,
    /// The PNG encoder's default trade-off.
    Default,
    /// Smallest files, slowest encoding.
    #[default]
    Best,
}

impl From<CompressionLevel> for ImageCompression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => ImageCompression::Fast,
            CompressionLevel::Default => ImageCompression::Balanced,
            CompressionLevel::Best => ImageCompression::Best,
        }
    }
}

/// Options for encoding and decoding images.
#[derive(Debug, Clone, Default, Args)]
pub struct CodecArgs {
    /// PNG compression effort used when writing images.
    #[arg(long = "compression", value_enum, default_value_t = CompressionLevel::default())]
    pub compression: CompressionLevel,

    /// Refuse to encode or decode images with more than this many pixels.
    ///
    /// By default images of any size are accepted.
    #[arg(long = "pixel-limit")]
    pub pixel_limit: Option<u64>,
}

impl CodecArgs {
    /// Validates the pixel limit, if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel limit is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(limit) = self.pixel_limit {
            validate_positive(limit, "pixel-limit")?;
        }
        Ok(())
    }

    /// Library codec settings for these options.
    #[must_use]
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions { compression: self.compression.into(), pixel_limit: self.pixel_limit }
    }
}

/// Threading options.
///
/// The transposition and the batch images are computed on a worker pool of
/// this size. Output is identical for every thread count.
#[derive(Debug, Clone, Args)]
pub struct ThreadingArgs {
    /// Number of worker threads.
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: usize,
}

impl Default for ThreadingArgs {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl ThreadingArgs {
    /// Validates the thread count.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread count is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_positive(self.threads, "threads")?;
        Ok(())
    }

    /// Returns a log message describing the threading configuration.
    #[must_use]
    pub fn log_message(&self) -> String {
        match self.threads {
            1 => "Single-threaded mode".to_string(),
            n => format!("Using {n} threads"),
        }
    }
}
