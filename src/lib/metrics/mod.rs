//! Metrics collection and reporting for cobsimg operations.
//!
//! - [`compression`] - Per-index compression metrics
//! - [`writer`] - Metrics file I/O utilities

pub mod compression;
pub mod writer;

use serde::{Deserialize, Serialize, Serializer};

pub use compression::CompressionMetrics;
pub use writer::{write_metrics, write_metrics_auto};

/// Number of decimal places used for float metrics.
pub const FLOAT_PRECISION: usize = 6;

/// Formats a float value with the standard precision for metrics.
///
/// # Example
/// ```
/// use cobsimg_lib::metrics::format_float;
/// assert_eq!(format_float(0.9), "0.900000");
/// assert_eq!(format_float(12.5), "12.500000");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// Serializes a float with [`FLOAT_PRECISION`] decimal places.
pub(crate) fn serialize_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_float(*value))
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages and logging when writing metrics files.
    fn metric_name() -> &'static str;
}
