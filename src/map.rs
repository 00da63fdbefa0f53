//! Projection and clustering pipeline.
//!
//! ```text
//! vectors ──Reducer──▶ raw coords ──normalize──▶ display coords ──ClusterSearch──▶ labels
//! ```
//!
//! [`project`] and [`cluster`] are the two halves with default settings. [`Mapper`]
//! holds the configuration (which reducer, output dimension, search budget) and
//! works on [`Embedding`]/[`Point`] records so metadata survives the trip.

use std::fmt;

use crate::cluster::{ClusterSearch, SearchResult};
use crate::error::{check_dimensions, Error, Result};
use crate::point::{attach_labels, Embedding, Point};
use crate::reduce::{check_display_dims, normalize, PowerIterationPca, ProjectionParams, Reducer};

/// Project `vectors` to `dims` (2 or 3) normalized display coordinates with PCA.
pub fn project(vectors: &[Vec<f64>], dims: usize) -> Result<Vec<Vec<f64>>> {
    Mapper::new().with_dims(dims).project_vectors(vectors)
}

/// Cluster display coordinates, aiming for `target` clusters when given.
pub fn cluster(points: &[Vec<f64>], target: Option<usize>) -> Result<SearchResult> {
    ClusterSearch::new().run(points, target)
}

/// Configured projection + clustering pipeline.
pub struct Mapper {
    reducer: Box<dyn Reducer>,
    dims: usize,
    search: ClusterSearch,
}

impl Mapper {
    /// PCA into 2 dimensions with default search settings.
    pub fn new() -> Self {
        Self::from_params(&ProjectionParams::default())
    }

    /// PCA configured from `params`.
    pub fn from_params(params: &ProjectionParams) -> Self {
        Self {
            reducer: Box::new(PowerIterationPca::from_params(params)),
            dims: params.dims,
            search: ClusterSearch::new(),
        }
    }

    /// Replace the reducer.
    pub fn with_reducer(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducer = Box::new(reducer);
        self
    }

    /// Set the output dimension (2 or 3).
    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = dims;
        self
    }

    /// Replace the cluster search driver.
    pub fn with_search(mut self, search: ClusterSearch) -> Self {
        self.search = search;
        self
    }

    /// Output dimension.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Name of the configured reducer.
    pub fn reducer_name(&self) -> &str {
        self.reducer.name()
    }

    /// Reduce and normalize raw vectors.
    pub fn project_vectors(&self, vectors: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        check_display_dims(self.dims)?;
        check_dimensions(vectors)?;

        let reduced = self.reducer.reduce(vectors, self.dims)?;
        if reduced.len() != vectors.len() {
            return Err(Error::LengthMismatch {
                expected: vectors.len(),
                found: reduced.len(),
            });
        }
        if let Some((index, p)) = reduced.iter().enumerate().find(|(_, p)| p.len() != self.dims) {
            return Err(Error::DimensionMismatch {
                index,
                expected: self.dims,
                found: p.len(),
            });
        }

        tracing::debug!(
            reducer = self.reducer.name(),
            n = vectors.len(),
            dims = self.dims,
            "projected vectors"
        );
        normalize(&reduced)
    }

    /// Project embeddings into points, copying their metadata.
    ///
    /// The vectors are cloned into a batch for the reducer, so peak memory is about
    /// twice the input size.
    pub fn project_embeddings(&self, embeddings: &[Embedding]) -> Result<Vec<Point>> {
        let vectors: Vec<Vec<f64>> = embeddings.iter().map(|e| e.vector.clone()).collect();
        let coords = self.project_vectors(&vectors)?;
        Ok(embeddings
            .iter()
            .zip(coords)
            .map(|(e, c)| Point::from_embedding(e, c))
            .collect())
    }

    /// Cluster points by their coordinates and attach the labels to them.
    pub fn cluster_points(&self, points: &mut [Point], target: Option<usize>) -> Result<SearchResult> {
        let coords: Vec<Vec<f64>> = points.iter().map(|p| p.coords.clone()).collect();
        let result = self.search.run(&coords, target)?;
        attach_labels(points, &result.labeling)?;
        Ok(result)
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("reducer", &self.reducer.name())
            .field("dims", &self.dims)
            .field("search", &self.search)
            .finish()
    }
}
