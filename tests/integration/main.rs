//! Integration tests for cobsimg.
//!
//! These tests validate end-to-end workflows that span multiple modules,
//! both through the library and through the `cobsimg` binary.

mod helpers;
mod test_compress_command;
mod test_decompress_command;
mod test_error_paths;
mod test_roundtrip;
mod test_verify_command;
