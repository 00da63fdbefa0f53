//! Principal component projection by power iteration.
//!
//! # The Algorithm
//!
//! For centered data `C` (n × d), the principal axes are the leading eigenvectors of
//! the covariance `CᵀC`. Power iteration finds the dominant one by repeating
//!
//! ```text
//! v ← normalize(Cᵀ (C v))
//! ```
//!
//! The product is evaluated as two matrix-vector passes, so the d × d covariance is
//! never materialized. That keeps memory at `O(n·d)` even for wide embeddings.
//!
//! Later axes are found the same way, with each iterate deflated against the axes
//! already accepted (`v ← v - (v·e) e`).
//!
//! # Randomness
//!
//! Every axis starts from a random vector, so two unseeded runs may disagree by a
//! sign flip (or, for near-equal eigenvalues, a rotation within that eigenspace).
//! The variance structure is the same either way. Set [`ProjectionParams::seed`] or
//! call [`PowerIterationPca::project_with_rng`] for reproducible output.
//!
//! # Complexity
//!
//! `O(k · iterations · n · d)` time, `O(n · d)` space.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_display_dims, Reducer};
use crate::error::{check_dimensions, Error, Result};

/// Iterates with a norm below this are considered collapsed.
const MIN_NORM: f64 = 1e-10;

/// Projection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    /// Output dimension, 2 or 3.
    pub dims: usize,
    /// Power-iteration steps per axis.
    pub iterations: usize,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            dims: 2,
            iterations: 100,
            seed: None,
        }
    }
}

/// PCA reducer using power iteration with deflation.
#[derive(Debug, Clone)]
pub struct PowerIterationPca {
    iterations: usize,
    seed: Option<u64>,
}

impl PowerIterationPca {
    /// Create a reducer with 100 iterations per axis and no seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from projection parameters (`dims` is supplied per call).
    pub fn from_params(params: &ProjectionParams) -> Self {
        Self {
            iterations: params.iterations,
            seed: params.seed,
        }
    }

    /// Set power-iteration steps per axis.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Project using a caller-supplied random source.
    pub fn project_with_rng<R: Rng>(
        &self,
        vectors: &[Vec<f64>],
        dims: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<f64>>> {
        if self.iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "iterations",
                message: "must be at least 1",
            });
        }
        check_display_dims(dims)?;
        let d = check_dimensions(vectors)?;

        let n = vectors.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }

        let centered = center(vectors, n, d);

        let mut basis: Vec<Vec<f64>> = Vec::with_capacity(dims);
        for axis in 0..dims {
            let v = self.power_iterate(&centered, n, d, &basis, rng);
            tracing::trace!(axis, "accepted principal axis");
            basis.push(v);
        }

        let mut out: Vec<Vec<f64>> = Vec::with_capacity(n);
        for i in 0..n {
            let row = &centered[i * d..(i + 1) * d];
            out.push(basis.iter().map(|e| dot(row, e)).collect());
        }
        Ok(out)
    }

    /// Find one axis: random start, then power steps deflated against `basis`.
    fn power_iterate<R: Rng>(
        &self,
        centered: &[f64],
        n: usize,
        d: usize,
        basis: &[Vec<f64>],
        rng: &mut R,
    ) -> Vec<f64> {
        let mut v: Vec<f64> = (0..d).map(|_| rng.random_range(-0.5..0.5)).collect();
        normalize_in_place(&mut v);

        let mut y = vec![0.0; n];
        for step in 0..self.iterations {
            // y = C v
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = dot(&centered[i * d..(i + 1) * d], &v);
            }

            // next = Cᵀ y
            let mut next = vec![0.0; d];
            for (i, &yi) in y.iter().enumerate() {
                let row = &centered[i * d..(i + 1) * d];
                for (acc, &x) in next.iter_mut().zip(row) {
                    *acc += x * yi;
                }
            }

            for e in basis {
                let proj = dot(&next, e);
                for (x, &ej) in next.iter_mut().zip(e) {
                    *x -= proj * ej;
                }
            }

            let norm = l2_norm(&next);
            if norm < MIN_NORM {
                tracing::trace!(step, norm, "power iteration collapsed, keeping last iterate");
                break;
            }
            for x in &mut next {
                *x /= norm;
            }
            v = next;
        }
        v
    }
}

impl Default for PowerIterationPca {
    fn default() -> Self {
        Self::from_params(&ProjectionParams::default())
    }
}

impl Reducer for PowerIterationPca {
    fn reduce(&self, vectors: &[Vec<f64>], dims: usize) -> Result<Vec<Vec<f64>>> {
        match self.seed {
            Some(s) => self.project_with_rng(vectors, dims, &mut StdRng::seed_from_u64(s)),
            None => self.project_with_rng(vectors, dims, &mut rand::rng()),
        }
    }

    fn name(&self) -> &str {
        "pca"
    }
}

/// Subtract the per-dimension mean. Returns row-major `n × d` storage.
fn center(vectors: &[Vec<f64>], n: usize, d: usize) -> Vec<f64> {
    let mut mean = vec![0.0; d];
    for v in vectors {
        for (m, &x) in mean.iter_mut().zip(v) {
            *m += x;
        }
    }
    for m in &mut mean {
        *m /= n as f64;
    }

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for v in vectors {
        flat.extend(v.iter().zip(&mean).map(|(x, m)| x - m));
    }
    flat
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn normalize_in_place(v: &mut [f64]) {
    let norm = l2_norm(v);
    if norm > MIN_NORM {
        for x in v {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairwise(points: &[Vec<f64>]) -> Vec<f64> {
        let mut out = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d: f64 = points[i]
                    .iter()
                    .zip(&points[j])
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                out.push(d.sqrt());
            }
        }
        out
    }

    #[test]
    fn output_shape() {
        let data: Vec<Vec<f64>> = (0..12)
            .map(|i| (0..6).map(|j| ((i * 7 + j * 3) % 11) as f64).collect())
            .collect();
        let pca = PowerIterationPca::new().with_seed(1);
        for dims in [2, 3] {
            let out = pca.reduce(&data, dims).unwrap();
            assert_eq!(out.len(), data.len());
            assert!(out.iter().all(|p| p.len() == dims));
            assert!(out.iter().flatten().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn empty_input() {
        let out = PowerIterationPca::new().reduce(&[], 2).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_dims() {
        let data = vec![vec![1.0, 2.0, 3.0]];
        for dims in [0, 1, 4] {
            assert_eq!(
                PowerIterationPca::new().reduce(&data, dims),
                Err(Error::InvalidParameter {
                    name: "dims",
                    message: "must be 2 or 3",
                })
            );
        }
    }

    #[test]
    fn ragged_input_fails_fast() {
        let data = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        assert!(matches!(
            PowerIterationPca::new().reduce(&data, 2),
            Err(Error::DimensionMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn zero_iterations_rejected() {
        let data = vec![vec![1.0, 2.0, 3.0]];
        assert!(PowerIterationPca::new()
            .with_iterations(0)
            .reduce(&data, 2)
            .is_err());
    }

    #[test]
    fn identical_vectors_collapse_cleanly() {
        let data = vec![vec![0.3, -1.2, 4.0, 2.5]; 5];
        let out = PowerIterationPca::new().reduce(&data, 2).unwrap();
        for p in &out {
            assert_eq!(p, &out[0]);
            assert!(p.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn all_zero_vectors() {
        let data = vec![vec![0.0; 8]; 4];
        let out = PowerIterationPca::new().reduce(&data, 3).unwrap();
        assert!(out.iter().flatten().all(|&x| x == 0.0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let data: Vec<Vec<f64>> = (0..10)
            .map(|i| vec![i as f64, (i * i) as f64 * 0.1, (i % 3) as f64, 1.0])
            .collect();
        let a = PowerIterationPca::new().with_seed(42).reduce(&data, 2).unwrap();
        let b = PowerIterationPca::new().with_seed(42).reduce(&data, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn recovers_dominant_axis() {
        // Points on a line along (1, 1, 0) with a tiny orthogonal wobble.
        let data: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                let t = i as f64;
                let wobble = if i % 2 == 0 { 0.01 } else { -0.01 };
                vec![t, t, wobble]
            })
            .collect();
        let out = PowerIterationPca::new().with_seed(3).reduce(&data, 2).unwrap();

        // First coordinate tracks t up to sign: |corr| ~ 1.
        let xs: Vec<f64> = out.iter().map(|p| p[0]).collect();
        let ts: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mean_x = xs.iter().sum::<f64>() / 20.0;
        let mean_t = ts.iter().sum::<f64>() / 20.0;
        let cov: f64 = xs.iter().zip(&ts).map(|(x, t)| (x - mean_x) * (t - mean_t)).sum();
        let vx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
        let vt: f64 = ts.iter().map(|t| (t - mean_t).powi(2)).sum();
        let corr = cov / (vx.sqrt() * vt.sqrt());
        assert!(corr.abs() > 0.999, "corr = {corr}");
    }

    #[test]
    fn full_rank_projection_preserves_distances() {
        // With d == k, PCA is a rotation of the centered data.
        let data = vec![
            vec![0.0, 0.0],
            vec![3.0, 1.0],
            vec![-1.0, 2.0],
            vec![4.0, -2.0],
            vec![1.0, 5.0],
        ];
        let out = PowerIterationPca::new().reduce(&data, 2).unwrap();
        for (a, b) in pairwise(&data).iter().zip(pairwise(&out)) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn axes_are_near_orthogonal() {
        let data: Vec<Vec<f64>> = (0..30)
            .map(|i| {
                let t = i as f64;
                vec![t.sin() * 3.0, t.cos(), (t * 0.5).sin() * 0.5, t * 0.01]
            })
            .collect();
        let out = PowerIterationPca::new().with_seed(9).reduce(&data, 3).unwrap();
        // Projections onto orthogonal axes are uncorrelated.
        for a in 0..3 {
            for b in (a + 1)..3 {
                let s: f64 = out.iter().map(|p| p[a] * p[b]).sum();
                let na: f64 = out.iter().map(|p| p[a] * p[a]).sum::<f64>().sqrt();
                let nb: f64 = out.iter().map(|p| p[b] * p[b]).sum::<f64>().sqrt();
                assert!((s / (na * nb)).abs() < 1e-3, "axes {a},{b}");
            }
        }
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: ProjectionParams = serde_json::from_str(r#"{"dims": 3}"#).unwrap();
        assert_eq!(
            params,
            ProjectionParams {
                dims: 3,
                iterations: 100,
                seed: None,
            }
        );
    }
}
