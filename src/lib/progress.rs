//! Progress reporting for batch image writing.
//!
//! Batches are encoded on a rayon pool and finish in any order, so the
//! counters are atomic and a log line reports how many batches are done out
//! of the known total rather than which batch just finished.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::{format_bytes, format_count, format_percent};

/// Totals recorded so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchTotals {
    /// Batch images written.
    pub batches: u64,
    /// Matrix rows covered by those images.
    pub rows: u64,
    /// Encoded bytes written.
    pub bytes: u64,
}

/// Counts written batch images and logs every `interval` completions.
///
/// # Example
/// ```
/// use cobsimg_lib::progress::BatchProgress;
///
/// let progress = BatchProgress::new(4).with_interval(2);
/// progress.record(50_000, 1_024); // 1/4, silent
/// progress.record(50_000, 1_024); // logs "Wrote 2/4 batch images (50.0%)"
/// progress.record(50_000, 1_024);
/// progress.record(10, 64);
/// let totals = progress.finish();
/// assert_eq!(totals.rows, 150_010);
/// ```
pub struct BatchProgress {
    total: u64,
    interval: u64,
    batches: AtomicU64,
    rows: AtomicU64,
    bytes: AtomicU64,
}

impl BatchProgress {
    /// Tracker for `total` batches, logging roughly every tenth of the work.
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            interval: (total / 10).max(1),
            batches: AtomicU64::new(0),
            rows: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
        }
    }

    /// Log after every `interval` batches instead; 0 is treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Records one written batch and returns the number of batches done.
    ///
    /// Intermediate milestones are logged here; the last batch is left to
    /// [`BatchProgress::finish`].
    pub fn record(&self, rows: u64, bytes: u64) -> u64 {
        self.rows.fetch_add(rows, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
        let done = self.batches.fetch_add(1, Ordering::Relaxed) + 1;

        if done < self.total && done.is_multiple_of(self.interval) {
            info!(
                "Wrote {}/{} batch images ({})",
                format_count(done),
                format_count(self.total),
                format_percent(done as f64 / self.total as f64, 1)
            );
        }
        done
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> BatchTotals {
        BatchTotals {
            batches: self.batches.load(Ordering::Relaxed),
            rows: self.rows.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
        }
    }

    /// Logs the completed totals and returns them.
    pub fn finish(&self) -> BatchTotals {
        let totals = self.totals();
        if totals.batches > 0 {
            info!(
                "Wrote {} batch images covering {} rows ({})",
                format_count(totals.batches),
                format_count(totals.rows),
                format_bytes(totals.bytes)
            );
        }
        totals
    }
}
