use palette::Srgb;
use tracing::debug;

use crate::color::ColorPoint;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::kmeans::{Cluster, KMeans};
use crate::sampler::{self, Raster};

/// One dominant color and how many sampled pixels it represents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    pub color: Srgb<u8>,
    pub count: usize,
    /// `count` as a fraction of all sampled pixels.
    pub share: f64,
}

impl PaletteEntry {
    /// Uppercase `RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}",
            self.color.red, self.color.green, self.color.blue
        )
    }
}

/// Turn clusters into palette entries, most populated first.
///
/// Clusters with equal counts keep their relative order.
#[must_use]
pub fn build_palette(sampled: &[ColorPoint], clusters: Vec<Cluster>) -> Vec<PaletteEntry> {
    let total = sampled.len();
    let mut entries: Vec<PaletteEntry> = clusters
        .into_iter()
        .map(|cluster| {
            let count = cluster.len();
            PaletteEntry {
                color: cluster.centroid().to_srgb(),
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            }
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Samples a raster, clusters the samples and ranks the clusters.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaletteBuilder {
    config: ScanConfig,
}

impl PaletteBuilder {
    #[must_use]
    pub const fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Sampled colors only, without clustering.
    ///
    /// # Errors
    /// When the sampling stride is zero.
    pub fn scan<R: Raster + ?Sized>(&self, raster: &R) -> Result<Vec<ColorPoint>> {
        sampler::sample(raster, self.config.sampling_stride)
    }

    /// Dominant colors of `raster`, most prevalent first.
    ///
    /// # Errors
    /// When the configuration is invalid or the raster yields no samples.
    pub fn color_stats<R: Raster + ?Sized>(&self, raster: &R) -> Result<Vec<PaletteEntry>> {
        self.config.validate()?;
        let points = self.scan(raster)?;
        let clusters = KMeans::new(self.config.cluster_count)
            .with_max_iterations(self.config.max_iterations)
            .with_seed(self.config.random_seed)
            .cluster(&points)?;
        let palette = build_palette(&points, clusters);
        debug!(
            entries = palette.len(),
            sampled = points.len(),
            "built palette"
        );
        Ok(palette)
    }
}
