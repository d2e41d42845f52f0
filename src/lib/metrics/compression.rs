//! Metrics describing how one index was compressed.

use serde::{Deserialize, Serialize};

use super::{Metric, serialize_float};

/// Size accounting for a single compressed index.
///
/// Written as one row of `X.compression_metrics.txt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionMetrics {
    /// File name of the index.
    pub index: String,
    /// Size of the original index in bytes.
    pub index_bytes: u64,
    /// Size of the header blob in bytes, both markers included.
    pub header_bytes: u64,
    /// Size of the bloom filter payload in bytes.
    pub payload_bytes: u64,
    /// Number of meaningful payload bits (`BF_size`).
    pub bf_size: u64,
    /// Image width in pixels.
    pub width: u64,
    /// Image height in pixels.
    pub height: u64,
    /// Zero bits appended to fill the last image row.
    pub padding_bits: u64,
    /// Size of the full image in bytes.
    pub image_bytes: u64,
    /// Number of batch images written.
    pub batch_count: u64,
    /// Combined size of all batch images in bytes.
    pub batch_bytes: u64,
    /// Size of the transposed matrix in bytes.
    pub transposed_bytes: u64,
    /// Payload bytes per full image byte.
    #[serde(serialize_with = "serialize_float")]
    pub compression_ratio: f64,
    /// Whether the round-trip check passed.
    pub verified: bool,
}

impl CompressionMetrics {
    /// Creates metrics for the named index with every count at zero.
    #[must_use]
    pub fn new(index: impl Into<String>) -> Self {
        Self { index: index.into(), ..Self::default() }
    }

    /// Recomputes [`Self::compression_ratio`] from the payload and image sizes.
    pub fn update_ratio(&mut self) {
        self.compression_ratio = if self.image_bytes == 0 {
            0.0
        } else {
            self.payload_bytes as f64 / self.image_bytes as f64
        };
    }

    /// Fraction of pixels that are padding rather than payload.
    #[must_use]
    pub fn padding_fraction(&self) -> f64 {
        let pixels = self.width * self.height;
        if pixels == 0 { 0.0 } else { self.padding_bits as f64 / pixels as f64 }
    }
}

impl Metric for CompressionMetrics {
    fn metric_name() -> &'static str {
        "compression"
    }
}
