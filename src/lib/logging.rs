//! Enhanced logging utilities for formatted output.
//!
//! Consistent, user-friendly formatting for counts, sizes and durations, plus
//! operation timing and the end-of-run compression summary.

use std::time::{Duration, Instant};

use crate::metrics::CompressionMetrics;

/// Formats a count with comma thousands separators.
///
/// # Examples
///
/// ```
/// use cobsimg_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    s.as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a percentage with specified decimal places.
///
/// # Arguments
///
/// * `value` - The fraction (0.0-1.0) to format as percentage
/// * `decimals` - Number of decimal places to include
///
/// # Returns
///
/// A string formatted as "XX.XX%" (e.g., "95.43%")
///
/// # Examples
///
/// ```
/// use cobsimg_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(0.5, 1), "50.0%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form.
///
/// # Arguments
///
/// * `duration` - The duration to format
///
/// # Returns
///
/// A human-readable string (e.g., "2m 15s", "1h 30m", "45s")
///
/// # Examples
///
/// ```
/// use cobsimg_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a rate (items per second) with appropriate units.
///
/// # Arguments
///
/// * `count` - Number of items processed
/// * `duration` - Time taken to process items
///
/// # Returns
///
/// A formatted rate string (e.g., "1,234 items/s", "50.0 items/min")
///
/// # Examples
///
/// ```
/// use cobsimg_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1)), "1,000 items/s");
/// assert_eq!(format_rate(600, Duration::from_secs(60)), "10 items/s");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} items/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} items/s", format_count(rate as u64))
    } else {
        let items_per_min = count as f64 / (secs / 60.0);
        format!("{items_per_min:.1} items/min")
    }
}

/// Formats a byte count with binary units.
///
/// # Examples
///
/// ```
/// use cobsimg_lib::logging::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.5 KiB");
/// assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Logs a formatted summary of one compressed index.
///
/// # Examples
///
/// ```no_run
/// use cobsimg_lib::logging::log_compression_summary;
/// use cobsimg_lib::metrics::CompressionMetrics;
///
/// let mut metrics = CompressionMetrics::new("sample.cobs_classic");
/// metrics.payload_bytes = 1_000_000;
/// metrics.image_bytes = 125_000;
/// metrics.update_ratio();
///
/// log_compression_summary(&metrics);
/// ```
pub fn log_compression_summary(metrics: &CompressionMetrics) {
    log::info!("Compression Summary for {}:", metrics.index);
    log::info!("  Index size: {}", format_bytes(metrics.index_bytes));
    log::info!("  Header size: {}", format_bytes(metrics.header_bytes));
    log::info!(
        "  Payload: {} ({} bits)",
        format_bytes(metrics.payload_bytes),
        format_count(metrics.bf_size)
    );
    log::info!(
        "  Image: {} x {} pixels, {} padding bits ({})",
        format_count(metrics.width),
        format_count(metrics.height),
        format_count(metrics.padding_bits),
        format_percent(metrics.padding_fraction(), 2)
    );
    log::info!("  Full image size: {}", format_bytes(metrics.image_bytes));
    if metrics.image_bytes > 0 {
        log::info!("  Compression ratio: {:.2}x", metrics.compression_ratio);
    }
    log::info!(
        "  Batches: {} totalling {}",
        format_count(metrics.batch_count),
        format_bytes(metrics.batch_bytes)
    );
    log::info!("  Transposed matrix size: {}", format_bytes(metrics.transposed_bytes));
    log::info!("  Round trip: {}", if metrics.verified { "verified" } else { "NOT verified" });
}

/// Operation timing and summary helper.
///
/// Tracks operation timing and provides formatted summary output.
///
/// # Examples
///
/// ```no_run
/// use cobsimg_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Packing bit matrix");
///
/// // ... do work ...
///
/// timer.log_completion(10_000); // Log with item count
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
