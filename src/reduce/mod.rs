//! Dimensionality reduction to display space.
//!
//! A [`Reducer`] maps `n` vectors of dimension `d` to `n` vectors of dimension 2 or 3.
//! The built-in implementation is [`PowerIterationPca`]; a neighbor-graph reducer (or
//! anything else that honors the same contract) can be plugged in through the trait.
//!
//! Reducer output is raw; [`normalize`] rescales each axis into
//! [`DISPLAY_MIN`]..=[`DISPLAY_MAX`] so renderers get a fixed frame.

mod normalize;
mod pca;

pub use normalize::{normalize, DISPLAY_MAX, DISPLAY_MIN};
pub use pca::{PowerIterationPca, ProjectionParams};

use crate::error::{Error, Result};

/// Common interface for reducers.
///
/// Implementations must return exactly one output vector per input vector, each of
/// length `dims`, reject ragged input with [`Error::DimensionMismatch`], and return an
/// empty result for an empty batch.
pub trait Reducer: Send + Sync {
    /// Reduce `vectors` to `dims` dimensions.
    fn reduce(&self, vectors: &[Vec<f64>], dims: usize) -> Result<Vec<Vec<f64>>>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Validate a target display dimension.
pub(crate) fn check_display_dims(dims: usize) -> Result<()> {
    if dims == 2 || dims == 3 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "dims",
            message: "must be 2 or 3",
        })
    }
}
