//! CLI command implementations for cobsimg.
//!
//! - [`compress`] - Convert a COBS classic index into images and side files
//! - [`verify`] - Check that a set of artifacts rebuilds the original index
//! - [`decompress`] - Rebuild an index from its artifacts

#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod compress;
pub mod decompress;
pub mod verify;
