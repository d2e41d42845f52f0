//! Synthetic COBS classic indexes for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use cobsimg_lib::header::CLASSIC_INDEX_MARKER;

/// Bloom filter bytes used throughout the documentation examples.
pub const EXAMPLE_PAYLOAD: [u8; 16] =
    [0, 10, 20, 30, 40, 50, 60, 70, 200, 210, 0, 0, 0, 0, 0, 255];

/// Header bytes placed between and around the two markers.
pub fn example_header() -> Vec<u8> {
    [
        b"COBS:".as_slice(),
        CLASSIC_INDEX_MARKER,
        b"\x01\x00\x00\x00term_size=31".as_slice(),
        CLASSIC_INDEX_MARKER,
    ]
    .concat()
}

/// A full index: header followed by `payload`.
pub fn build_index(payload: &[u8]) -> Vec<u8> {
    [example_header().as_slice(), payload].concat()
}

/// Deterministic pseudo-random payload of `len` bytes with a few long zero
/// runs, roughly the texture of a sparse bloom filter.
pub fn sparse_payload(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            if (i / 64) % 3 == 0 { 0 } else { (state >> 56) as u8 }
        })
        .collect()
}

/// Writes `header ++ payload` to `dir/name` and returns its path.
pub fn write_index(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, build_index(payload)).expect("Failed to write index");
    path
}

/// Runs the `cobsimg` binary with `args`.
pub fn run_cobsimg<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_cobsimg"))
        .args(args)
        .output()
        .expect("Failed to run cobsimg")
}

/// Runs `cobsimg compress` on `input` into `output` with extra `args`.
pub fn run_compress(input: &Path, output: &Path, args: &[&str]) -> Output {
    let mut all = vec![
        "compress".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ];
    all.extend(args.iter().map(|a| (*a).to_string()));
    run_cobsimg(all)
}
