//! Utilities for writing metrics files.
//!
//! Convenience functions for writing metrics to TSV files with consistent
//! error handling.

use fgoxide::io::DelimFile;
use serde::Serialize;
use std::path::Path;

use super::Metric;
use crate::errors::{CobsImgError, Result};

/// Write metrics to a TSV file with consistent error handling.
///
/// # Arguments
/// * `path` - Path to the output TSV file
/// * `metrics` - The metrics to write (must implement Serialize)
/// * `description` - Human-readable description of the metrics for error messages
///
/// # Errors
/// Returns an error if the file cannot be created or written to
///
/// # Example
/// ```no_run
/// use cobsimg_lib::metrics::writer::write_metrics;
/// use serde::Serialize;
/// use std::path::Path;
///
/// #[derive(Serialize)]
/// struct ImageSize {
///     width: u64,
///     height: u64,
/// }
///
/// let metrics = vec![ImageSize { width: 4000, height: 12 }];
/// write_metrics(Path::new("sizes.txt"), &metrics, "image size").unwrap();
/// ```
pub fn write_metrics<P: AsRef<Path>, T: Serialize>(
    path: P,
    metrics: &[T],
    description: &str,
) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default().write_tsv(&path_ref, metrics).map_err(|e| CobsImgError::MetricsWrite {
        description: description.to_string(),
        path: path_ref.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write metrics implementing the [`Metric`] trait, named by the metric itself.
///
/// # Errors
/// Returns an error if the file cannot be created or written to
pub fn write_metrics_auto<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    write_metrics(path, metrics, T::metric_name())
}
