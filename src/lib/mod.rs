#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: Bit and pixel counts are converted between usize, u32 and u64 throughout
// - missing_*_doc: Documentation improvements tracked separately
// - needless_pass_by_value: Some APIs designed for ownership transfer
// - items_after_statements: Some test code uses late item declarations
// - module_name_repetitions: Types such as `BatchSplitter` live in `batch`
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # cobsimg - COBS index image codec library
//!
//! Stores the bloom-filter matrix of a COBS classic index as a lossless 1-bit
//! grayscale PNG and proves, byte for byte, that the index can be rebuilt
//! from the image plus two small side files.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`header`]** - Splits an index at the end of its second `CLASSIC_INDEX` marker
//! - **[`matrix`]** - Lays the payload out as a zero-padded bit matrix
//! - **[`image`]** - 1-bit grayscale PNG encoding and decoding
//! - **[`batch`]** - Row-range batch images
//! - **[`transpose`]** - Column-major packed side artifact
//! - **[`verify`]** - Reconstruction and round-trip checking
//! - **[`pipeline`]** - The full compression run and decompression
//!
//! ### Utilities
//!
//! - **[`bits`]** - MSB-first bit helpers shared by every module
//! - **[`metadata`]** - The `BF_size` side file
//! - **[`artifacts`]** - Output file naming
//! - **[`validation`]** - Input validation utilities for parameters and files
//! - **[`progress`]** - Batch-writing progress counters
//! - **[`logging`]** - Formatting helpers and run summaries
//! - **[`metrics`]** - Per-index compression metrics and TSV output
//!
//! ## Quick Start
//!
//! ### Compressing an index
//!
//! ```no_run
//! use cobsimg_lib::pipeline::{CompressOptions, compress_index};
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = CompressOptions { width: 4000, ..CompressOptions::default() };
//! let summary = compress_index("sample.cobs_classic", "out", &options)?;
//! println!("wrote {} batch images", summary.batches.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Packing and encoding in memory
//!
//! ```
//! use cobsimg_lib::image::{CodecOptions, decode, encode};
//! use cobsimg_lib::matrix::pack;
//!
//! let payload = [0u8, 10, 20, 30, 40, 50, 60, 70, 200, 210, 0, 0, 0, 0, 0, 255];
//! let packed = pack(&payload, 80).unwrap();
//! assert_eq!(packed.matrix.rows(), 2);
//! assert_eq!(packed.padding_bits(), 32);
//!
//! let options = CodecOptions::default();
//! let png = encode(&packed.matrix, &options).unwrap();
//! let decoded = decode(&png, &options).unwrap();
//! assert_eq!(decoded.take_bits(packed.original_bit_count), payload.to_vec());
//! ```

pub mod artifacts;
pub mod batch;
pub mod bits;
pub mod errors;
pub mod header;
pub mod image;
pub mod logging;
pub mod matrix;
pub mod metadata;
pub mod metrics;
pub mod pipeline;
pub mod progress;
pub mod transpose;
pub mod validation;
pub mod verify;

pub use errors::{CobsImgError, Result};
