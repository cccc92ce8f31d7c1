//! k-means over sampled colors: k-means++ seeding followed by Lloyd iterations.
//!
//! One run of [`KMeans::cluster`]:
//!
//! 1. Seed the first centroid uniformly from the input, then draw each further
//!    centroid with probability proportional to its squared distance from the
//!    nearest centroid chosen so far.
//! 2. Assign every point to its nearest centroid (lowest index on ties).
//! 3. Refill clusters that ended up empty (see below).
//! 4. Move every populated centroid to the mean of its members.
//! 5. Repeat 2-4 until the labels stop changing or the iteration cap is hit.
//!
//! ## Empty clusters
//!
//! A cluster left without members after assignment is handed the point that is
//! farthest from its own centroid, taken only from clusters that have more than
//! one member so the donor never empties. Empty clusters are visited in index
//! order and the farthest point is the one with the lowest index on ties. When
//! no cluster can donate (fewer points than clusters) the slot stays empty and
//! keeps its previous centroid.
//!
//! Everything is driven by a generator seeded per call, so the same input, `k`,
//! cap and seed always produce identical clusters.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::color::{ColorPoint, DistanceMeasure, Euclidean};
use crate::error::{Error, Result};

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_SEED: u64 = 1000;

/// A centroid and the points assigned to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    centroid: ColorPoint,
    members: Vec<ColorPoint>,
}

impl Cluster {
    #[cfg(test)]
    pub(crate) const fn from_parts(centroid: ColorPoint, members: Vec<ColorPoint>) -> Self {
        Self { centroid, members }
    }

    #[must_use]
    pub const fn centroid(&self) -> &ColorPoint {
        &self.centroid
    }

    #[must_use]
    pub fn members(&self) -> &[ColorPoint] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// k-means++ clusterer.
#[derive(Clone, Debug)]
pub struct KMeans<D = Euclidean> {
    k: usize,
    max_iterations: usize,
    seed: u64,
    distance: D,
}

impl KMeans {
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
            distance: Euclidean,
        }
    }
}

impl<D: DistanceMeasure + Sync> KMeans<D> {
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Swap the metric used for both seeding and assignment.
    ///
    /// Only this clusterer sees the new metric; [`ColorPoint::distance`]
    /// stays Euclidean.
    #[must_use]
    pub fn with_distance<E: DistanceMeasure + Sync>(self, distance: E) -> KMeans<E> {
        KMeans {
            k: self.k,
            max_iterations: self.max_iterations,
            seed: self.seed,
            distance,
        }
    }

    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Partition `points` into exactly `k` clusters.
    ///
    /// Reaching the iteration cap is not an error; the clusters from the last
    /// iteration are returned.
    ///
    /// # Errors
    /// When `points` is empty, or `k` or the iteration cap is zero.
    pub fn cluster(&self, points: &[ColorPoint]) -> Result<Vec<Cluster>> {
        if points.is_empty() {
            return Err(Error::invalid("points", "cannot cluster an empty point set"));
        }
        if self.k == 0 {
            return Err(Error::invalid("k", "cluster count must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", "must be at least 1"));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(points, &mut rng);
        let mut labels = vec![usize::MAX; points.len()];
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let mut next = self.assign(points, &centroids);
            let reseeded = self.refill_empty(points, &centroids, &mut next);

            let changed = labels.iter().zip(&next).filter(|(a, b)| a != b).count();
            trace!(iteration = iterations, changed, reseeded, "lloyd step");
            labels = next;

            update_centroids(points, &labels, &mut centroids);

            if changed == 0 {
                converged = true;
                break;
            }
        }

        debug!(
            points = points.len(),
            k = self.k,
            iterations,
            converged,
            "k-means finished"
        );

        let groups = group_members(points, &labels, centroids.len());
        Ok(centroids
            .into_iter()
            .zip(groups)
            .map(|(centroid, members)| Cluster { centroid, members })
            .collect())
    }

    /// k-means++ seeding.
    fn seed_centroids(&self, points: &[ColorPoint], rng: &mut ChaCha8Rng) -> Vec<ColorPoint> {
        let n = points.len();
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(points[rng.random_range(0..n)]);

        // Squared distance from each point to its nearest chosen centroid.
        let mut weights: Vec<f64> = points
            .iter()
            .map(|p| self.squared(p, &centroids[0]))
            .collect();

        while centroids.len() < self.k {
            let total: f64 = weights.iter().sum();
            let idx = if total > 0.0 {
                pick_weighted(&weights, rng.random::<f64>() * total)
            } else {
                // Every point coincides with a centroid already.
                rng.random_range(0..n)
            };
            let chosen = points[idx];
            centroids.push(chosen);

            for (w, p) in weights.iter_mut().zip(points) {
                *w = w.min(self.squared(p, &chosen));
            }
        }

        debug!(k = self.k, "seeded centroids");
        centroids
    }

    #[inline]
    fn squared(&self, a: &ColorPoint, b: &ColorPoint) -> f64 {
        let d = self.distance.distance(a, b);
        d * d
    }

    fn nearest(&self, point: &ColorPoint, centroids: &[ColorPoint]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in centroids.iter().enumerate() {
            let d = self.distance.distance(point, c);
            // Strict comparison keeps the lower index on ties.
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    #[cfg(not(feature = "parallel"))]
    fn assign(&self, points: &[ColorPoint], centroids: &[ColorPoint]) -> Vec<usize> {
        points.iter().map(|p| self.nearest(p, centroids)).collect()
    }

    #[cfg(feature = "parallel")]
    fn assign(&self, points: &[ColorPoint], centroids: &[ColorPoint]) -> Vec<usize> {
        points.par_iter().map(|p| self.nearest(p, centroids)).collect()
    }

    /// Move a donor point into every empty cluster that can get one.
    /// Returns how many clusters were refilled.
    fn refill_empty(
        &self,
        points: &[ColorPoint],
        centroids: &[ColorPoint],
        labels: &mut [usize],
    ) -> usize {
        let mut sizes = vec![0usize; centroids.len()];
        for &l in labels.iter() {
            sizes[l] += 1;
        }

        let mut refilled = 0;
        for empty in 0..centroids.len() {
            if sizes[empty] != 0 {
                continue;
            }

            let mut donor: Option<(usize, f64)> = None;
            for (i, p) in points.iter().enumerate() {
                let owner = labels[i];
                if sizes[owner] < 2 {
                    continue;
                }
                let d = self.distance.distance(p, &centroids[owner]);
                if donor.is_none_or(|(_, best)| d > best) {
                    donor = Some((i, d));
                }
            }

            let Some((i, _)) = donor else {
                trace!(cluster = empty, "no donor for empty cluster");
                break;
            };
            sizes[labels[i]] -= 1;
            sizes[empty] = 1;
            labels[i] = empty;
            refilled += 1;
            trace!(cluster = empty, point = i, "reseeded empty cluster");
        }
        refilled
    }
}

/// Index of the first point whose cumulative weight reaches `target`.
fn pick_weighted(weights: &[f64], target: f64) -> usize {
    let mut remaining = target;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        last_positive = i;
        remaining -= w;
        if remaining <= 0.0 {
            return i;
        }
    }
    // Rounding can leave a sliver of `target` unconsumed.
    last_positive
}

/// Points of each cluster, in input order.
fn group_members(points: &[ColorPoint], labels: &[usize], k: usize) -> Vec<Vec<ColorPoint>> {
    let mut groups = vec![Vec::new(); k];
    for (p, &l) in points.iter().zip(labels) {
        groups[l].push(*p);
    }
    groups
}

/// Mean of each cluster's members; empty clusters keep their centroid.
fn update_centroids(points: &[ColorPoint], labels: &[usize], centroids: &mut [ColorPoint]) {
    let groups = group_members(points, labels, centroids.len());
    for (centroid, members) in centroids.iter_mut().zip(&groups) {
        if let Some(mean) = ColorPoint::mean(members) {
            *centroid = mean;
        }
    }
}
