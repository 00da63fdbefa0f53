use thiserror::Error;

/// Errors returned by the projection and clustering operations in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Vectors in a batch have inconsistent dimensionality.
    #[error("dimension mismatch at index {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Position of the first offending vector.
        index: usize,
        /// Dimensionality of the first vector in the batch.
        expected: usize,
        /// Dimensionality of the offending vector.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A per-point sequence does not line up with its point list.
    #[error("length mismatch: expected {expected} entries, found {found}")]
    LengthMismatch {
        /// Number of points.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that every vector in `data` has the length of the first one.
///
/// Returns the common dimension (0 for an empty batch).
pub(crate) fn check_dimensions(data: &[Vec<f64>]) -> Result<usize> {
    let Some(first) = data.first() else {
        return Ok(0);
    };
    let d = first.len();
    for (index, v) in data.iter().enumerate().skip(1) {
        if v.len() != d {
            return Err(Error::DimensionMismatch {
                index,
                expected: d,
                found: v.len(),
            });
        }
    }
    Ok(d)
}
