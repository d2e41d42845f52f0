//! Integration tests for the compress command.

use std::fs;

use cobsimg_lib::artifacts::ArtifactPaths;
use cobsimg_lib::image::{CodecOptions, read_image};
use cobsimg_lib::metadata::IndexMetadata;
use cobsimg_lib::metrics::CompressionMetrics;
use fgoxide::io::DelimFile;
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::*;

#[rstest]
#[case(8, 16, 0)]
#[case(80, 2, 32)]
fn test_compress_example(#[case] width: usize, #[case] rows: usize, #[case] padding: u64) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "sample.cobs_classic", &EXAMPLE_PAYLOAD);
    let output = temp_dir.path().join("out");

    let result = run_compress(&input, &output, &["--width", &width.to_string()]);
    assert_success(&result);

    let artifacts = ArtifactPaths::for_input(&input, &output).unwrap();
    assert_artifacts_exist(&artifacts, 1);
    assert_files_identical(&input, &artifacts.input_copy());
    assert_files_identical(&input, &artifacts.reconstructed());
    assert_eq!(fs::read(artifacts.header()).unwrap(), example_header());

    let metadata = fs::read_to_string(artifacts.metadata()).unwrap();
    assert_eq!(metadata.lines().next(), Some("BF_size = 128"));
    assert_eq!(IndexMetadata::read(artifacts.metadata()).unwrap().bf_size, 128);

    let image = read_image(artifacts.full_image(), &CodecOptions::default()).unwrap();
    assert_eq!(image.width(), width);
    assert_eq!(image.rows(), rows);
    assert_eq!(image.take_bits(128), EXAMPLE_PAYLOAD.to_vec());

    let metrics: Vec<CompressionMetrics> =
        DelimFile::default().read_tsv(&artifacts.metrics()).unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].index, "sample.cobs_classic");
    assert_eq!(metrics[0].padding_bits, padding);
    assert!(metrics[0].verified);
}

#[test]
fn test_compress_writes_batches_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let payload = sparse_payload(1000, 7);
    let input = write_index(temp_dir.path(), "big.idx", &payload);
    let output = temp_dir.path().join("out");

    // 8000 bits at width 64 -> 125 rows -> batches of 40, 40, 40, 5
    let result = run_compress(&input, &output, &["--width", "64", "--rows-per-batch", "40"]);
    assert_success(&result);

    let artifacts = ArtifactPaths::for_input(&input, &output).unwrap();
    assert_artifacts_exist(&artifacts, 4);
    let rows: Vec<usize> = (0..4)
        .map(|i| read_image(artifacts.batch_image(i), &CodecOptions::default()).unwrap().rows())
        .collect();
    assert_eq!(rows, vec![40, 40, 40, 5]);
}

#[test]
fn test_compress_transposed_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &EXAMPLE_PAYLOAD);
    let output = temp_dir.path().join("out");

    assert_success(&run_compress(&input, &output, &["--width", "80"]));
    let artifacts = ArtifactPaths::for_input(&input, &output).unwrap();
    // 2 rows x 80 columns
    assert_eq!(fs::metadata(artifacts.transposed()).unwrap().len(), 20);
}

#[rstest]
#[case("fast")]
#[case("default")]
#[case("best")]
fn test_compress_levels_all_verify(#[case] level: &str) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &sparse_payload(512, 3));
    let output = temp_dir.path().join("out");

    let result =
        run_compress(&input, &output, &["--width", "128", "--compression", level, "--threads", "2"]);
    assert_success(&result);
    let artifacts = ArtifactPaths::for_input(&input, &output).unwrap();
    assert_files_identical(&input, &artifacts.reconstructed());
}

#[test]
fn test_compress_thread_count_does_not_change_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_index(temp_dir.path(), "x", &sparse_payload(4096, 11));
    let one = temp_dir.path().join("one");
    let eight = temp_dir.path().join("eight");

    let args = ["--width", "256", "--rows-per-batch", "10"];
    assert_success(&run_compress(&input, &one, &args));
    let mut threaded = args.to_vec();
    threaded.extend(["--threads", "8"]);
    assert_success(&run_compress(&input, &eight, &threaded));

    let a = ArtifactPaths::for_input(&input, &one).unwrap();
    let b = ArtifactPaths::for_input(&input, &eight).unwrap();
    assert_files_identical(&a.full_image(), &b.full_image());
    assert_files_identical(&a.transposed(), &b.transposed());
    for i in 0..13 {
        assert_files_identical(&a.batch_image(i), &b.batch_image(i));
    }
}
