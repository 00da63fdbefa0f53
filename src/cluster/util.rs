#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two equal-length vectors.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Smallest strictly positive and largest pairwise distance.
///
/// Returns `None` when no pair is a positive distance apart (fewer than two points,
/// or every point coincides).
pub fn distance_bounds(points: &[Vec<f64>]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = 0.0f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = euclidean(a, b);
            if d > 0.0 && d < lo {
                lo = d;
            }
            hi = hi.max(d);
        }
    }
    lo.is_finite().then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_345() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn bounds_skip_duplicates() {
        let points = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0], vec![4.0, 0.0]];
        assert_eq!(distance_bounds(&points), Some((1.0, 4.0)));
    }

    #[test]
    fn bounds_degenerate() {
        assert_eq!(distance_bounds(&[]), None);
        assert_eq!(distance_bounds(&[vec![1.0, 1.0]]), None);
        assert_eq!(distance_bounds(&[vec![1.0, 1.0], vec![1.0, 1.0]]), None);
    }
}
