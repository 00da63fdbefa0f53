//! Density clustering of projected points.
//!
//! ## DBSCAN
//!
//! [`Dbscan`] groups points whose ε-neighborhoods chain together through core
//! points and marks everything else as noise (`-1`). It does not need the number of
//! clusters in advance, but it does need ε.
//!
//! ## Choosing ε
//!
//! [`estimate_epsilon`] takes the median k-distance, with `min_pts` derived from the
//! dataset size by [`min_pts_for`]. When the caller wants a specific number of
//! clusters, [`ClusterSearch`] binary-searches ε instead and falls back to the
//! estimate if the count cannot be hit.
//!
//! ## Usage
//!
//! ```rust
//! use embmap::cluster::{ClusterSearch, Clustering, Dbscan};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
//! assert_eq!(labels.as_slice(), &[0, 0, 1, 1]);
//!
//! let result = ClusterSearch::new().run(&data, Some(2)).unwrap();
//! assert!(result.is_exact());
//! ```

mod dbscan;
mod epsilon;
mod search;
mod traits;
mod util;

pub use dbscan::Dbscan;
pub use epsilon::{estimate_epsilon, k_distances, k_for_min_pts, min_pts_for, FALLBACK_EPSILON};
pub use search::{ClusterSearch, SearchOutcome, SearchResult};
pub use traits::Clustering;
pub use util::{distance_bounds, euclidean};
