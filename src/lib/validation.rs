//! Input validation utilities
//!
//! Checks shared by the library entry points and the command-line layer. All
//! failures are reported as structured [`CobsImgError`] values.

use crate::errors::{CobsImgError, Result};
use std::fmt::Display;
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input index", "Header")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use cobsimg_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/index.cobs_classic", "Input index");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.is_file() {
        return Err(CobsImgError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that multiple files exist
///
/// # Errors
/// Returns an error for the first file that doesn't exist
///
/// # Example
/// ```no_run
/// use cobsimg_lib::validation::validate_files_exist;
/// use std::path::PathBuf;
///
/// let files = vec![
///     (PathBuf::from("idx.all.png"), "Image"),
///     (PathBuf::from("idx.cobs_header.bin"), "Header"),
/// ];
/// validate_files_exist(&files).unwrap();
/// ```
pub fn validate_files_exist<P: AsRef<Path>>(files: &[(P, &str)]) -> Result<()> {
    for (path, desc) in files {
        validate_file_exists(path, desc)?;
    }
    Ok(())
}

/// Validate that an output directory does not exist yet.
///
/// Compression refuses to write into an existing directory so that artifacts
/// from different runs are never mixed.
///
/// # Errors
/// Returns an error if anything already exists at `path`
pub fn validate_output_dir_absent<P: AsRef<Path>>(path: P) -> Result<()> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        return Err(CobsImgError::InvalidParameter {
            parameter: "output".to_string(),
            reason: format!("'{}' already exists", path_ref.display()),
        });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use cobsimg_lib::validation::validate_positive;
///
/// validate_positive(50_000, "rows-per-batch").unwrap();
///
/// let result = validate_positive(0, "rows-per-batch");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(CobsImgError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}
