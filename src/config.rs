use crate::error::{Error, Result};
use crate::kmeans::{DEFAULT_MAX_ITERATIONS, DEFAULT_SEED};

pub const DEFAULT_CLUSTER_COUNT: usize = 8;
pub const DEFAULT_SAMPLING_STRIDE: u32 = 10;

/// Options for one palette extraction.
///
/// `sampling_stride` only controls how many pixels are read;
/// `max_iterations` only bounds the clustering loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    pub cluster_count: usize,
    pub sampling_stride: u32,
    pub max_iterations: usize,
    pub random_seed: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cluster_count: DEFAULT_CLUSTER_COUNT,
            sampling_stride: DEFAULT_SAMPLING_STRIDE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            random_seed: DEFAULT_SEED,
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub const fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    #[must_use]
    pub const fn with_sampling_stride(mut self, sampling_stride: u32) -> Self {
        self.sampling_stride = sampling_stride;
        self
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn with_random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// # Errors
    /// When any count or stride is zero.
    pub fn validate(&self) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(Error::invalid("cluster_count", "must be at least 1"));
        }
        if self.sampling_stride == 0 {
            return Err(Error::invalid("sampling_stride", "must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}
