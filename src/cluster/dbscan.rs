//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Determines the number of clusters from the data
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum neighborhood size (the point itself included) for a
//!   point to be "core".
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. Visit points in index order. For each unvisited point P:
//!    - Find the points within ε (P included)
//!    - If fewer than MinPts, mark P as noise (it may be absorbed later)
//!    - Else P is core: open the next cluster and expand breadth-first
//!
//! 2. Expansion: pop a queued point Q:
//!    - Noise → relabel as a border point of the current cluster, stop there
//!    - Already clustered → skip
//!    - Otherwise label it, and if Q is core, queue its unclassified neighbors
//!
//! Clusters are numbered in discovery order starting at 0; noise is `-1`.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) with the brute-force region query used here.
//! - **Space**: O(n) for labels and the queue marker.
//!
//! ## Limitations
//!
//! - Struggles with varying densities
//! - ε is sensitive and dataset-dependent; see [`super::estimate_epsilon`]
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

use super::traits::Clustering;
use super::util::euclidean;
use crate::error::{check_dimensions, Error, Result};
use crate::point::{Labeling, NOISE};

// Internal label encoding: anything >= 0 is a cluster id.
const UNVISITED: i32 = -2;

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f64,
    /// Minimum neighborhood size for core point classification.
    min_pts: usize,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum neighborhood size, counting the point itself.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Minimum neighborhood size for a core point.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be positive and finite",
            });
        }
        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// All points within epsilon of `point_idx`, itself included.
    fn region_query(&self, data: &[Vec<f64>], point_idx: usize) -> Vec<usize> {
        let point = &data[point_idx];
        data.iter()
            .enumerate()
            .filter(|(_, other)| euclidean(point, other) <= self.epsilon)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Grow cluster `cluster_id` breadth-first from the core point `point_idx`.
    fn expand_cluster(
        &self,
        data: &[Vec<f64>],
        point_idx: usize,
        neighbors: Vec<usize>,
        labels: &mut [i32],
        queued: &mut [bool],
        cluster_id: i32,
    ) {
        labels[point_idx] = cluster_id;

        let mut to_process: VecDeque<usize> = VecDeque::with_capacity(neighbors.len());
        for idx in neighbors {
            if idx != point_idx && labels[idx] < 0 && !queued[idx] {
                queued[idx] = true;
                to_process.push_back(idx);
            }
        }

        while let Some(idx) = to_process.pop_front() {
            match labels[idx] {
                NOISE => {
                    // Border point: joins the cluster but does not extend it.
                    labels[idx] = cluster_id;
                    continue;
                }
                UNVISITED => {}
                _ => continue,
            }
            labels[idx] = cluster_id;

            let next = self.region_query(data, idx);
            if next.len() >= self.min_pts {
                for nn in next {
                    if labels[nn] < 0 && !queued[nn] {
                        queued[nn] = true;
                        to_process.push_back(nn);
                    }
                }
            }
        }
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}

impl Clustering for Dbscan {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Labeling> {
        self.validate()?;
        check_dimensions(data)?;

        let n = data.len();
        if n < 2 {
            return Ok(Labeling::trivial(n));
        }

        let mut labels = vec![UNVISITED; n];
        let mut queued = vec![false; n];
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if labels[point_idx] != UNVISITED {
                continue;
            }

            let neighbors = self.region_query(data, point_idx);
            if neighbors.len() < self.min_pts {
                // Not dense enough: noise for now, may become a border point later.
                labels[point_idx] = NOISE;
                continue;
            }

            self.expand_cluster(
                data,
                point_idx,
                neighbors,
                &mut labels,
                &mut queued,
                cluster_id,
            );
            cluster_id += 1;
        }

        Ok(Labeling::new(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_blobs() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.5, 0.0],
            vec![0.0, 0.5],
            vec![10.0, 10.0],
            vec![10.5, 10.0],
            vec![10.0, 10.5],
        ];

        let labels = Dbscan::new(2.0, 2).fit_predict(&data).unwrap();
        assert_eq!(labels.as_slice(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(labels.noise_count(), 0);
    }

    #[test]
    fn two_clusters_tight() {
        let data = vec![
            // Cluster 1: around (0, 0)
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.1],
            vec![0.05, 0.05],
            // Cluster 2: around (5, 5)
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
            vec![5.1, 5.1],
            vec![5.05, 5.05],
        ];

        let labels = Dbscan::new(0.3, 3).fit_predict(&data).unwrap();
        let labels = labels.as_slice();
        assert_eq!(labels.len(), 10);
        assert!(labels[..5].iter().all(|&l| l == 0));
        assert!(labels[5..].iter().all(|&l| l == 1));
    }

    #[test]
    fn outlier_is_noise() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.1],
            vec![100.0, 100.0],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
            vec![5.1, 5.1],
        ];

        let labels = Dbscan::new(0.3, 3).fit_predict(&data).unwrap();
        assert!(labels.is_noise(4));
        assert_eq!(labels.noise_count(), 1);
        assert_eq!(labels.num_clusters(), 2);
    }

    #[test]
    fn all_noise() {
        let data = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ];

        let labels = Dbscan::new(0.5, 3).fit_predict(&data).unwrap();
        assert_eq!(labels.as_slice(), &[-1, -1, -1, -1]);
    }

    #[test]
    fn min_pts_one_makes_every_point_core() {
        let data = vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![0.0, 10.0]];
        let labels = Dbscan::new(0.5, 1).fit_predict(&data).unwrap();
        assert_eq!(labels.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn noise_point_absorbed_as_border() {
        // Point 0 is visited first and has too few neighbors, so it starts as noise.
        // Point 1 is core (0, 1, 2 within reach) and absorbs it later.
        let data = vec![vec![-1.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]];
        let labels = Dbscan::new(1.0, 3).fit_predict(&data).unwrap();
        assert_eq!(labels.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn border_point_does_not_extend_cluster() {
        // 0..=2 plus 3 make 0 a core point; 3 is only a border point, so 4
        // (reachable solely through 3) stays noise.
        let data = vec![
            vec![0.0, 0.0],
            vec![-0.3, 0.0],
            vec![-0.6, 0.0],
            vec![0.9, 0.0],
            vec![1.8, 0.0],
        ];
        let labels = Dbscan::new(1.0, 4).fit_predict(&data).unwrap();
        assert_eq!(labels.as_slice(), &[0, 0, 0, 0, -1]);
    }

    #[test]
    fn chain_is_one_cluster() {
        let data: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64 * 0.3, 0.0]).collect();
        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
        assert!(labels.as_slice().iter().all(|&l| l == 0));
    }

    #[test]
    fn trivial_inputs() {
        let dbscan = Dbscan::new(0.5, 3);
        assert!(dbscan.fit_predict(&[]).unwrap().is_empty());
        assert_eq!(dbscan.fit_predict(&[vec![1.0, 2.0]]).unwrap().as_slice(), &[0]);
    }

    #[test]
    fn invalid_params() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];

        assert!(Dbscan::new(0.0, 3).fit_predict(&data).is_err());
        assert!(Dbscan::new(-1.0, 3).fit_predict(&data).is_err());
        assert!(Dbscan::new(f64::NAN, 3).fit_predict(&data).is_err());
        assert!(Dbscan::new(0.5, 0).fit_predict(&data).is_err());
        // Parameters are checked even for degenerate input.
        assert!(Dbscan::new(0.0, 3).fit_predict(&[]).is_err());
    }

    #[test]
    fn dimension_mismatch() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            Dbscan::new(1.0, 2).fit_predict(&data),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn deterministic() {
        let data: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let t = i as f64;
                vec![(t * 1.3).sin() * 4.0, (t * 0.7).cos() * 4.0]
            })
            .collect();
        let dbscan = Dbscan::new(0.8, 3);
        let a = dbscan.fit_predict(&data).unwrap();
        let b = dbscan.fit_predict(&data).unwrap();
        assert_eq!(a, b);
    }
}
