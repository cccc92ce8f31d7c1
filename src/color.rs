use palette::Srgb;

/// A sampled color as a point in 3-dimensional RGB space.
///
/// Channels are kept as `f64` so centroids can be non-integral while the
/// clusterer iterates; rounding happens only when a color is displayed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPoint {
    channels: [f64; 3],
}

impl ColorPoint {
    #[must_use]
    pub const fn new(channels: [f64; 3]) -> Self {
        Self { channels }
    }

    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new([f64::from(r), f64::from(g), f64::from(b)])
    }

    /// Read-only view of the three channel values.
    #[must_use]
    pub const fn channels(&self) -> &[f64; 3] {
        &self.channels
    }

    /// Euclidean distance to `other`.
    ///
    /// This is the default metric of [`crate::KMeans`]; a clusterer built with
    /// `with_distance` uses its own metric instead.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        Euclidean.distance(self, other)
    }

    /// Nearest integral color, each channel clamped to `0..=255`.
    #[must_use]
    pub fn to_srgb(&self) -> Srgb<u8> {
        let [r, g, b] = self.channels.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Srgb::new(r, g, b)
    }

    /// Channel-wise arithmetic mean, or `None` for an empty slice.
    #[must_use]
    pub fn mean(points: &[Self]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut sum = [0.0f64; 3];
        for p in points {
            for (s, c) in sum.iter_mut().zip(p.channels) {
                *s += c;
            }
        }
        let n = points.len() as f64;
        Some(Self::new(sum.map(|s| s / n)))
    }
}

impl From<[u8; 3]> for ColorPoint {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<Srgb<u8>> for ColorPoint {
    fn from(c: Srgb<u8>) -> Self {
        Self::from_rgb(c.red, c.green, c.blue)
    }
}

/// Metric used by the clusterer for both seeding weights and assignment.
pub trait DistanceMeasure {
    fn distance(&self, a: &ColorPoint, b: &ColorPoint) -> f64;
}

/// Flat L2 distance over channel values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl DistanceMeasure for Euclidean {
    #[inline]
    fn distance(&self, a: &ColorPoint, b: &ColorPoint) -> f64 {
        a.channels
            .iter()
            .zip(b.channels.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}
