//! Integration tests for the verify command.

use std::fs;
use std::path::Path;
use std::process::Output;

use cobsimg_lib::artifacts::ArtifactPaths;
use tempfile::TempDir;

use crate::helpers::*;

fn compress_example(dir: &Path) -> (std::path::PathBuf, ArtifactPaths) {
    let input = write_index(dir, "sample.cobs_classic", &EXAMPLE_PAYLOAD);
    let output = dir.join("out");
    assert_success(&run_compress(&input, &output, &["--width", "80"]));
    let artifacts = ArtifactPaths::for_input(&input, &output).unwrap();
    (input, artifacts)
}

fn run_verify(artifacts: &ArtifactPaths, index: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "verify".to_string(),
        "--image".to_string(),
        artifacts.full_image().display().to_string(),
        "--header".to_string(),
        artifacts.header().display().to_string(),
        "--metadata".to_string(),
        artifacts.metadata().display().to_string(),
        "--index".to_string(),
        index.display().to_string(),
    ];
    args.extend(extra.iter().map(|a| (*a).to_string()));
    run_cobsimg(args)
}

#[test]
fn test_verify_success_writes_reconstruction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());

    let result = run_verify(&artifacts, &input, &[]);
    assert_success(&result);

    let reconstructed = temp_dir.path().join("sample.cobs_classic.decompressed");
    assert_files_identical(&input, &reconstructed);
}

#[test]
fn test_verify_custom_reconstructed_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());
    let target = temp_dir.path().join("rebuilt.bin");

    let result = run_verify(&artifacts, &input, &["--reconstructed", target.to_str().unwrap()]);
    assert_success(&result);
    assert_files_identical(&input, &target);
}

#[test]
fn test_verify_detects_modified_index() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());

    let mut tampered = fs::read(&input).unwrap();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    let tampered_path = temp_dir.path().join("tampered");
    fs::write(&tampered_path, &tampered).unwrap();

    let result = run_verify(&artifacts, &tampered_path, &[]);
    assert_failure_mentions(&result, "first difference at byte");
}

#[test]
fn test_verify_detects_wrong_bf_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());
    fs::write(artifacts.metadata(), "BF_size = 120\n").unwrap();

    let result = run_verify(&artifacts, &input, &[]);
    assert_failure_mentions(&result, "length differs");
}

#[test]
fn test_verify_missing_bf_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());
    fs::write(artifacts.metadata(), "width = 80\nheight = 2\n").unwrap();

    let result = run_verify(&artifacts, &input, &[]);
    assert_failure_mentions(&result, "BF_size");
}

#[test]
fn test_verify_missing_image() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, artifacts) = compress_example(temp_dir.path());
    fs::remove_file(artifacts.full_image()).unwrap();

    let result = run_verify(&artifacts, &input, &[]);
    assert_failure_mentions(&result, "does not exist");
}
