//! Compress a COBS classic index into a lossless 1-bit PNG plus side files.
//!
//! The bloom-filter payload becomes a full image and a series of batch
//! images; the header and `BF_size` are stored alongside. The full image is
//! checked by rebuilding the index from it before the batches are written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cobsimg_lib::logging::format_count;
use cobsimg_lib::pipeline::{
    CompressOptions, DEFAULT_ROWS_PER_BATCH, DEFAULT_WIDTH, compress_index,
};
use cobsimg_lib::validation::validate_file_exists;

use crate::commands::command::Command;
use crate::commands::common::{CodecArgs, ThreadingArgs};

/// Compress a COBS classic index into images.
#[derive(Debug, Parser)]
#[command(
    name = "compress",
    about = "\x1b[38;5;72m[CODEC]\x1b[0m          \x1b[36mCompress a COBS classic index into lossless 1-bit PNG images\x1b[0m",
    long_about = r#"
Compress a COBS classic index into lossless 1-bit PNG images.

The index is split after the second CLASSIC_INDEX marker. Everything up to and
including that marker is stored verbatim as the header; the remaining bloom
filter bytes are laid out as a matrix of --width bits per row (zero-padded on
the last row) and written as a 1-bit grayscale PNG.

For an input named X the output directory receives:
  X                           copy of the input
  X.cobs_header.bin           header
  X.cobs_header.metadata      BF_size (number of payload bits), width, height
  X.all.png                   full image
  X.all.part_<i>.png          batch images of at most --rows-per-batch rows
  X.bf_matrix.transposed      column-major packed matrix
  X.decompressed              index rebuilt from the full image
  X.compression_metrics.txt   size metrics

The run fails if the rebuilt index differs from the input in any byte. The
output directory must not already exist.

Example usage:
  cobsimg compress -i sample.cobs_classic -o sample_images
  cobsimg compress -i sample.cobs_classic -o sample_images --width 8000 --threads 8
"#
)]
pub struct Compress {
    /// Input COBS classic index
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output directory; must not exist
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Image width in pixels (bits per row); must be a multiple of 8
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Maximum number of rows in each batch image
    #[arg(short = 'r', long = "rows-per-batch", default_value_t = DEFAULT_ROWS_PER_BATCH)]
    pub rows_per_batch: usize,

    /// Image codec options
    #[command(flatten)]
    pub codec: CodecArgs,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingArgs,
}

impl Compress {
    fn options(&self) -> CompressOptions {
        CompressOptions {
            width: self.width,
            rows_per_batch: self.rows_per_batch,
            codec: self.codec.codec_options(),
            threads: self.threading.threads,
        }
    }
}

impl Command for Compress {
    fn execute(&self, command_line: &str) -> Result<()> {
        validate_file_exists(&self.input, "Input index")?;
        self.codec.validate()?;
        self.threading.validate()?;
        let options = self.options();
        options.validate()?;

        info!("Starting Compress");
        info!("Command line: {command_line}");
        info!("Input: {}", self.input.display());
        info!("Output: {}", self.output.display());
        info!("Width: {}", format_count(self.width as u64));
        info!("Rows per batch: {}", format_count(self.rows_per_batch as u64));
        info!("{}", self.threading.log_message());

        let summary = compress_index(&self.input, &self.output, &options)
            .with_context(|| format!("Failed to compress {}", self.input.display()))?;

        info!(
            "Wrote {} batch image(s) and side files to {}",
            summary.batches.len(),
            summary.artifacts.output_dir().display()
        );
        Ok(())
    }
}
