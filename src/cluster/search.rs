//! Epsilon search for a target cluster count.
//!
//! Binary-searches ε between the smallest positive and the largest pairwise
//! distance, running DBSCAN at each midpoint:
//!
//! - more clusters than wanted → ε is too small, raise the lower bound
//! - fewer clusters than wanted → ε is too large, lower the upper bound
//!
//! This assumes the cluster count does not increase as ε grows. That holds for
//! most point clouds but not all: growing ε can turn noise points into core points
//! that form a new cluster before neighboring clusters merge. When the search runs
//! out of iterations without an exact hit it falls back to the auto-ε result and
//! reports [`SearchOutcome::Fallback`] instead of an error.

use serde::{Deserialize, Serialize};

use super::dbscan::Dbscan;
use super::epsilon::{estimate_epsilon, k_for_min_pts, min_pts_for};
use super::traits::Clustering;
use super::util::distance_bounds;
use crate::error::{check_dimensions, Error, Result};
use crate::point::Labeling;

/// How a [`SearchResult`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Fewer than two points; every point is in cluster 0.
    Trivial,
    /// No target was requested; ε came from the k-distance estimate.
    AutoEpsilon,
    /// The search hit the requested count.
    Exact {
        /// DBSCAN runs used, counting the successful one.
        iterations: usize,
    },
    /// The search ran out of steps; the auto-ε labeling was returned.
    ///
    /// The auto-ε labeling can still land on the requested count, in which case
    /// `realized == target`. Use [`SearchResult::meets_target`] to tell the two apart.
    Fallback {
        /// Requested cluster count.
        target: usize,
        /// Cluster count of the returned labeling.
        realized: usize,
    },
}

/// Labeling plus the ε that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// One label per input point.
    pub labeling: Labeling,
    /// Radius used for the returned labeling, `None` for trivial input.
    pub epsilon: Option<f64>,
    /// Minimum neighborhood size used for every DBSCAN run.
    pub min_pts: usize,
    /// How the labeling was obtained.
    pub outcome: SearchOutcome,
}

impl SearchResult {
    /// Whether a requested cluster count was matched exactly.
    pub fn is_exact(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Exact { .. })
    }

    /// Whether the search gave up and returned the auto-ε labeling.
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Fallback { .. })
    }

    /// Whether a requested cluster count ended up realized, by the search or by
    /// the fallback.
    pub fn meets_target(&self) -> bool {
        match self.outcome {
            SearchOutcome::Exact { .. } => true,
            SearchOutcome::Fallback { target, realized } => target == realized,
            SearchOutcome::Trivial | SearchOutcome::AutoEpsilon => false,
        }
    }
}

/// DBSCAN driver with automatic ε and optional target cluster count.
#[derive(Debug, Clone)]
pub struct ClusterSearch {
    max_iterations: usize,
}

impl ClusterSearch {
    /// Create a driver with a 30-iteration search budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of binary-search steps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Maximum number of binary-search steps.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Cluster `points`, aiming for `target` clusters when given.
    pub fn run(&self, points: &[Vec<f64>], target: Option<usize>) -> Result<SearchResult> {
        if target == Some(0) {
            return Err(Error::InvalidParameter {
                name: "target",
                message: "must be at least 1",
            });
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iterations",
                message: "must be at least 1",
            });
        }
        check_dimensions(points)?;

        let n = points.len();
        let min_pts = min_pts_for(n);
        if n < 2 {
            return Ok(SearchResult {
                labeling: Labeling::trivial(n),
                epsilon: None,
                min_pts,
                outcome: SearchOutcome::Trivial,
            });
        }

        let Some(target) = target else {
            let (labeling, epsilon) = auto_epsilon(points, min_pts)?;
            return Ok(SearchResult {
                labeling,
                epsilon: Some(epsilon),
                min_pts,
                outcome: SearchOutcome::AutoEpsilon,
            });
        };

        if let Some((mut lo, mut hi)) = distance_bounds(points) {
            for iteration in 1..=self.max_iterations {
                let mid = (lo + hi) / 2.0;
                let labeling = Dbscan::new(mid, min_pts).fit_predict(points)?;
                let count = labeling.num_clusters();
                tracing::debug!(iteration, epsilon = mid, count, target, "epsilon search step");

                if count == target {
                    return Ok(SearchResult {
                        labeling,
                        epsilon: Some(mid),
                        min_pts,
                        outcome: SearchOutcome::Exact {
                            iterations: iteration,
                        },
                    });
                }
                if count > target {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
        }

        let (labeling, epsilon) = auto_epsilon(points, min_pts)?;
        let realized = labeling.num_clusters();
        if realized == target {
            tracing::debug!(
                target,
                epsilon,
                "search exhausted, auto epsilon meets the target cluster count"
            );
        } else {
            tracing::warn!(
                target,
                realized,
                epsilon,
                max_iterations = self.max_iterations,
                "target cluster count not reached, using auto epsilon"
            );
        }
        Ok(SearchResult {
            labeling,
            epsilon: Some(epsilon),
            min_pts,
            outcome: SearchOutcome::Fallback { target, realized },
        })
    }
}

impl Default for ClusterSearch {
    fn default() -> Self {
        Self { max_iterations: 30 }
    }
}

/// Run DBSCAN once with ε from the median k-distance.
fn auto_epsilon(points: &[Vec<f64>], min_pts: usize) -> Result<(Labeling, f64)> {
    let mut epsilon = estimate_epsilon(points, k_for_min_pts(min_pts));
    if epsilon <= 0.0 {
        // Duplicate-heavy data: a zero median would be rejected by DBSCAN.
        epsilon = f64::MIN_POSITIVE;
    }
    tracing::debug!(epsilon, min_pts, "auto epsilon");
    let labeling = Dbscan::new(epsilon, min_pts).fit_predict(points)?;
    Ok((labeling, epsilon))
}
