use crate::error::Result;
use crate::point::Labeling;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Return one cluster label per input point, `-1` for noise.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Labeling>;
}
