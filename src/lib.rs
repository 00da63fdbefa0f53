//! Embedding maps.
//!
//! `embmap` turns a batch of high-dimensional embeddings into 2D or 3D display
//! coordinates and groups the resulting point cloud into density-based clusters.
//!
//! - [`reduce`](mod@reduce): power-iteration PCA behind a pluggable [`Reducer`] trait, plus
//!   per-axis normalization into a fixed display range
//! - [`cluster`](mod@cluster): DBSCAN, k-distance ε estimation, and an ε search that targets a
//!   requested cluster count
//! - [`map`](mod@map): the pipeline tying the two together and carrying embedding metadata
//!   through to the output points
//!
//! Every operation is a synchronous, pure function of its inputs. The only
//! randomness is the PCA starting vectors, which can be seeded.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod map;
pub mod point;
pub mod reduce;

pub use cluster::{ClusterSearch, Clustering, Dbscan, SearchOutcome, SearchResult};
pub use error::{Error, Result};
pub use map::{cluster, project, Mapper};
pub use point::{attach_labels, Embedding, Labeling, Point, NOISE};
pub use reduce::{normalize, PowerIterationPca, ProjectionParams, Reducer};
