//! Check that a set of artifacts rebuilds the original index exactly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cobsimg_lib::validation::validate_files_exist;
use cobsimg_lib::verify::{VerifyPaths, ensure_round_trip};

use crate::commands::command::Command;
use crate::commands::common::CodecArgs;

/// Verify that compressed artifacts rebuild the original index.
#[derive(Debug, Parser)]
#[command(
    name = "verify",
    about = "\x1b[38;5;173m[QC]\x1b[0m             \x1b[36mCheck that compressed artifacts rebuild the original index\x1b[0m",
    long_about = r#"
Check that compressed artifacts rebuild the original index byte for byte.

The full image is decoded, flattened row by row, truncated to the BF_size
recorded in the metadata, and appended to the header. The result is written to
--reconstructed (default: <index>.decompressed) and compared with --index.

Exits with a non-zero status if the two differ, reporting the first differing
byte.

Example usage:
  cobsimg verify --image out/X.all.png --header out/X.cobs_header.bin \
      --metadata out/X.cobs_header.metadata --index X
"#
)]
pub struct Verify {
    /// Full compressed image (X.all.png)
    #[arg(long = "image")]
    pub image: PathBuf,

    /// Header file (X.cobs_header.bin)
    #[arg(long = "header")]
    pub header: PathBuf,

    /// Metadata file (X.cobs_header.metadata)
    #[arg(long = "metadata")]
    pub metadata: PathBuf,

    /// The original, uncompressed index
    #[arg(long = "index")]
    pub index: PathBuf,

    /// Where to write the rebuilt index
    #[arg(long = "reconstructed")]
    pub reconstructed: Option<PathBuf>,

    /// Image codec options
    #[command(flatten)]
    pub codec: CodecArgs,
}

impl Verify {
    fn paths(&self) -> VerifyPaths {
        let paths = VerifyPaths::new(
            self.image.clone(),
            self.header.clone(),
            self.metadata.clone(),
            self.index.clone(),
        );
        match &self.reconstructed {
            Some(path) => paths.with_reconstructed(path.clone()),
            None => paths,
        }
    }
}

impl Command for Verify {
    fn execute(&self, command_line: &str) -> Result<()> {
        validate_files_exist(&[
            (&self.image, "Image"),
            (&self.header, "Header"),
            (&self.metadata, "Metadata"),
            (&self.index, "Original index"),
        ])?;
        self.codec.validate()?;

        let paths = self.paths();
        info!("Starting Verify");
        info!("Command line: {command_line}");
        info!("Image: {}", paths.image.display());
        info!("Original index: {}", paths.original.display());
        info!("Reconstructed index: {}", paths.reconstructed.display());

        ensure_round_trip(&paths, &self.codec.codec_options())
            .with_context(|| format!("Verification of {} failed", paths.image.display()))?;

        info!("Reconstructed index is identical to {}", paths.original.display());
        Ok(())
    }
}
