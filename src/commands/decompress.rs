//! Rebuild a COBS classic index from its compressed artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cobsimg_lib::logging::format_bytes;
use cobsimg_lib::pipeline::decompress_index;
use cobsimg_lib::validation::validate_files_exist;

use crate::commands::command::Command;
use crate::commands::common::CodecArgs;

/// Rebuild an index from its images, header and metadata.
#[derive(Debug, Parser)]
#[command(
    name = "decompress",
    about = "\x1b[38;5;72m[CODEC]\x1b[0m          \x1b[36mRebuild a COBS classic index from its images\x1b[0m",
    long_about = r#"
Rebuild a COBS classic index from its compressed artifacts.

Give either the full image or every batch image in index order; batch rows are
concatenated before the payload is truncated to the BF_size recorded in the
metadata.

Example usage:
  cobsimg decompress --image out/X.all.png --header out/X.cobs_header.bin \
      --metadata out/X.cobs_header.metadata -o X.restored
  cobsimg decompress --image out/X.all.part_0.png out/X.all.part_1.png \
      --header out/X.cobs_header.bin --metadata out/X.cobs_header.metadata -o X.restored
"#
)]
pub struct Decompress {
    /// Full image, or batch images in index order
    #[arg(long = "image", required = true, num_args = 1..)]
    pub images: Vec<PathBuf>,

    /// Header file (X.cobs_header.bin)
    #[arg(long = "header")]
    pub header: PathBuf,

    /// Metadata file (X.cobs_header.metadata)
    #[arg(long = "metadata")]
    pub metadata: PathBuf,

    /// Output index
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Image codec options
    #[command(flatten)]
    pub codec: CodecArgs,
}

impl Command for Decompress {
    fn execute(&self, command_line: &str) -> Result<()> {
        let mut inputs: Vec<(&PathBuf, &str)> =
            self.images.iter().map(|p| (p, "Image")).collect();
        inputs.push((&self.header, "Header"));
        inputs.push((&self.metadata, "Metadata"));
        validate_files_exist(&inputs)?;
        self.codec.validate()?;

        info!("Starting Decompress");
        info!("Command line: {command_line}");
        info!("Images: {}", self.images.len());
        info!("Output: {}", self.output.display());

        let written = decompress_index(
            &self.images,
            &self.header,
            &self.metadata,
            &self.output,
            &self.codec.codec_options(),
        )
        .with_context(|| format!("Failed to rebuild index {}", self.output.display()))?;

        info!("Rebuilt index of {}", format_bytes(written));
        Ok(())
    }
}
