//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Output;

use cobsimg_lib::artifacts::ArtifactPaths;

/// Asserts that two files have identical contents.
///
/// # Panics
///
/// Panics if either file cannot be read or the contents differ.
pub fn assert_files_identical(expected: &Path, actual: &Path) {
    let a = fs::read(expected).expect("Failed to read expected file");
    let b = fs::read(actual).expect("Failed to read actual file");
    assert_eq!(a.len(), b.len(), "{} and {} differ in length", expected.display(), actual.display());
    assert!(a == b, "{} and {} differ", expected.display(), actual.display());
}

/// Asserts that every artifact of a compression run exists, with batches
/// `0..batch_count` present and batch `batch_count` absent.
///
/// # Panics
///
/// Panics if any artifact is missing or an extra batch exists.
pub fn assert_artifacts_exist(artifacts: &ArtifactPaths, batch_count: usize) {
    for path in [
        artifacts.input_copy(),
        artifacts.header(),
        artifacts.metadata(),
        artifacts.full_image(),
        artifacts.transposed(),
        artifacts.reconstructed(),
        artifacts.metrics(),
    ] {
        assert!(path.is_file(), "missing artifact {}", path.display());
    }
    for i in 0..batch_count {
        let path = artifacts.batch_image(i);
        assert!(path.is_file(), "missing batch {}", path.display());
    }
    assert!(!artifacts.batch_image(batch_count).exists(), "unexpected extra batch");
}

/// Asserts that a process exited successfully, printing its stderr if not.
///
/// # Panics
///
/// Panics if the process failed.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Asserts that a process failed and its stderr mentions `fragment`.
///
/// # Panics
///
/// Panics if the process succeeded or stderr lacks `fragment`.
pub fn assert_failure_mentions(output: &Output, fragment: &str) {
    assert!(!output.status.success(), "command unexpectedly succeeded");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(fragment), "stderr does not mention '{fragment}': {stderr}");
}
