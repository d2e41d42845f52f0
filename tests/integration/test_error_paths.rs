//! Error path integration tests.
//!
//! Invalid inputs and parameters must fail with a non-zero exit status, a
//! message naming the problem, and no partial output where avoidable.

use std::fs;

use tempfile::TempDir;

use crate::helpers::*;

#[test]
fn test_unaligned_width_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let output = temp_dir.path().join("out");

    let result = run_compress(&input, &output, &["--width", "10"]);
    assert_failure_mentions(&result, "not divisible by 8");
    assert!(!output.exists());
}

#[test]
fn test_zero_width_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let result = run_compress(&input, &temp_dir.path().join("out"), &["--width", "0"]);
    assert_failure_mentions(&result, "width");
}

#[test]
fn test_zero_rows_per_batch_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let result = run_compress(&input, &temp_dir.path().join("out"), &["--rows-per-batch", "0"]);
    assert_failure_mentions(&result, "rows-per-batch");
}

#[test]
fn test_existing_output_directory_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let output = temp_dir.path().join("out");
    fs::create_dir(&output).unwrap();

    let result = run_compress(&input, &output, &[]);
    assert_failure_mentions(&result, "already exists");
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn test_missing_input_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result =
        run_compress(&temp_dir.path().join("absent"), &temp_dir.path().join("out"), &[]);
    assert_failure_mentions(&result, "does not exist");
}

#[test]
fn test_single_marker_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("x");
    fs::write(&input, b"headerCLASSIC_INDEX\x00\x01\x02").unwrap();
    let output = temp_dir.path().join("out");

    let result = run_compress(&input, &output, &[]);
    assert_failure_mentions(&result, "second occurrence");
    assert!(!output.exists());
}

#[test]
fn test_not_an_index_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("x");
    fs::write(&input, b"just some bytes").unwrap();

    let result = run_compress(&input, &temp_dir.path().join("out"), &[]);
    assert_failure_mentions(&result, "first occurrence");
}

#[test]
fn test_empty_payload_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &[]);

    let result = run_compress(&input, &temp_dir.path().join("out"), &[]);
    assert_failure_mentions(&result, "no bloom filter data");
}

#[test]
fn test_pixel_limit_enforced() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);

    // 16 rows x 8 pixels = 128 pixels
    let result = run_compress(
        &input,
        &temp_dir.path().join("out"),
        &["--width", "8", "--pixel-limit", "100"],
    );
    assert_failure_mentions(&result, "pixel limit");
}

#[test]
fn test_unknown_compression_level_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let result =
        run_compress(&input, &temp_dir.path().join("out"), &["--compression", "extreme"]);
    assert!(!result.status.success());
}
