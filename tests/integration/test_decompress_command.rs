//! Integration tests for the decompress command.

use std::path::Path;
use std::process::Output;

use cobsimg_lib::artifacts::ArtifactPaths;
use tempfile::TempDir;

use crate::helpers::*;

fn run_decompress(images: &[&Path], artifacts: &ArtifactPaths, output: &Path) -> Output {
    let mut args = vec!["decompress".to_string(), "--image".to_string()];
    args.extend(images.iter().map(|p| p.display().to_string()));
    args.extend([
        "--header".to_string(),
        artifacts.header().display().to_string(),
        "--metadata".to_string(),
        artifacts.metadata().display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ]);
    run_cobsimg(args)
}

#[test]
fn test_decompress_from_full_image() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &sparse_payload(777, 5));
    let out_dir = temp_dir.path().join("out");
    assert_success(&run_compress(&input, &out_dir, &["--width", "96"]));
    let artifacts = ArtifactPaths::for_input(&input, &out_dir).unwrap();

    let restored = temp_dir.path().join("restored");
    let full = artifacts.full_image();
    assert_success(&run_decompress(&[full.as_path()], &artifacts, &restored));
    assert_files_identical(&input, &restored);
}

#[test]
fn test_decompress_from_batches() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &sparse_payload(777, 5));
    let out_dir = temp_dir.path().join("out");
    // 6216 bits at width 96 -> 65 rows -> 7 batches of at most 10 rows
    assert_success(&run_compress(&input, &out_dir, &["--width", "96", "--rows-per-batch", "10"]));
    let artifacts = ArtifactPaths::for_input(&input, &out_dir).unwrap();
    assert_artifacts_exist(&artifacts, 7);

    let parts: Vec<_> = (0..7).map(|i| artifacts.batch_image(i)).collect();
    let part_refs: Vec<&Path> = parts.iter().map(|p| p.as_path()).collect();
    let restored = temp_dir.path().join("restored");
    assert_success(&run_decompress(&part_refs, &artifacts, &restored));
    assert_files_identical(&input, &restored);
}

#[test]
fn test_decompress_missing_batch_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let out_dir = temp_dir.path().join("out");
    assert_success(&run_compress(&input, &out_dir, &["--width", "8", "--rows-per-batch", "4"]));
    let artifacts = ArtifactPaths::for_input(&input, &out_dir).unwrap();

    // three of four batches hold 96 of the 128 bits
    let parts: Vec<_> = (0..3).map(|i| artifacts.batch_image(i)).collect();
    let part_refs: Vec<&Path> = parts.iter().map(|p| p.as_path()).collect();
    let restored = temp_dir.path().join("restored");
    let result = run_decompress(&part_refs, &artifacts, &restored);
    assert_failure_mentions(&result, "BF_size");
    assert!(!restored.exists());
}
