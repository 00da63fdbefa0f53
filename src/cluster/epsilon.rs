//! Epsilon selection from k-distances.
//!
//! The k-distance of a point is the distance to its k-th nearest other point. In a
//! k-distance plot, points inside clusters sit on the flat low part of the curve
//! and outliers on the steep tail; the median is a robust pick for ε that lands on
//! the flat part as long as most points belong to some cluster.

use super::util::euclidean;

/// Returned when too few points exist to compute any k-distance.
pub const FALLBACK_EPSILON: f64 = 1.0;

/// DBSCAN `min_pts` for a dataset of `n` points: `max(2, min(5, n / 10))`.
pub fn min_pts_for(n: usize) -> usize {
    (n / 10).clamp(2, 5)
}

/// The k-distance neighbor rank used for a given `min_pts`.
///
/// `min_pts` counts the point itself, so the matching neighbor rank is one less.
pub fn k_for_min_pts(min_pts: usize) -> usize {
    min_pts.saturating_sub(1).max(1)
}

/// Distance from each point to its `k`-th nearest other point.
///
/// Points with fewer than `k` other points contribute nothing, so the result may be
/// shorter than `points` (or empty). `k == 0` yields no values.
pub fn k_distances(points: &[Vec<f64>], k: usize) -> Vec<f64> {
    if k == 0 || points.len() <= k {
        return Vec::new();
    }

    let mut out: Vec<f64> = Vec::with_capacity(points.len());
    let mut dists: Vec<f64> = Vec::with_capacity(points.len() - 1);
    for (i, p) in points.iter().enumerate() {
        dists.clear();
        dists.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| euclidean(p, q)),
        );
        dists.sort_by(f64::total_cmp);
        out.push(dists[k - 1]);
    }
    out
}

/// Median k-distance, or [`FALLBACK_EPSILON`] when none can be computed.
pub fn estimate_epsilon(points: &[Vec<f64>], k: usize) -> f64 {
    let mut kd = k_distances(points, k);
    if kd.is_empty() {
        return FALLBACK_EPSILON;
    }
    kd.sort_by(f64::total_cmp);
    kd[kd.len() / 2]
}
