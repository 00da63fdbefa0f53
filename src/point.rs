//! Input and output records.
//!
//! An [`Embedding`] is what callers hand in; a [`Point`] is what comes back after
//! projection. Everything except the raw vector is carried across untouched, so a
//! renderer can show labels, scores and tooltips without a second lookup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Label value used for noise points.
pub const NOISE: i32 = -1;

/// A high-dimensional vector plus optional display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Caller-chosen identifier.
    pub id: String,
    /// The raw vector.
    pub vector: Vec<f64>,
    /// Short display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text content (e.g. the embedded chunk).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Relevance score in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Group tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Open key/value metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Embedding {
    /// Create an embedding with no metadata.
    pub fn new(id: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            vector,
            label: None,
            content: None,
            score: None,
            group: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the free-text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A projected point: display coordinates plus the source embedding's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Identifier copied from the embedding.
    pub id: String,
    /// Normalized coordinates, length 2 or 3.
    pub coords: Vec<f64>,
    /// Display label copied from the embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text content copied from the embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Relevance score copied from the embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Group tag copied from the embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Key/value metadata copied from the embedding.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    /// Cluster label, `None` until a [`Labeling`] is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<i32>,
}

impl Point {
    /// Build a point from an embedding and its projected coordinates.
    pub(crate) fn from_embedding(embedding: &Embedding, coords: Vec<f64>) -> Self {
        Self {
            id: embedding.id.clone(),
            coords,
            label: embedding.label.clone(),
            content: embedding.content.clone(),
            score: embedding.score,
            group: embedding.group.clone(),
            metadata: embedding.metadata.clone(),
            cluster: None,
        }
    }

    /// Whether this point was labeled as noise.
    pub fn is_noise(&self) -> bool {
        self.cluster == Some(NOISE)
    }
}

/// One cluster label per point, in input order.
///
/// `-1` ([`NOISE`]) marks noise; `0..m` are clusters numbered in discovery order.
/// Labelings built by hand or deserialized may use any non-negative ids, gaps
/// included; the counting helpers work on distinct ids, not on the largest one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labeling(Vec<i32>);

impl Labeling {
    /// Wrap a raw label vector.
    pub fn new(labels: Vec<i32>) -> Self {
        Self(labels)
    }

    /// The trivial labeling for degenerate inputs: every point in cluster 0.
    pub fn trivial(n: usize) -> Self {
        Self(vec![0; n])
    }

    /// Number of labeled points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw labels in point order.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Unwrap into the raw label vector.
    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }

    /// Whether the point at `idx` is noise.
    pub fn is_noise(&self, idx: usize) -> bool {
        self.0.get(idx) == Some(&NOISE)
    }

    /// Number of distinct non-negative labels.
    pub fn num_clusters(&self) -> usize {
        self.0
            .iter()
            .filter(|&&l| l >= 0)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of points labeled as noise.
    pub fn noise_count(&self) -> usize {
        self.0.iter().filter(|&&l| l == NOISE).count()
    }

    /// Member count per cluster id, noise excluded.
    pub fn cluster_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes: BTreeMap<usize, usize> = BTreeMap::new();
        for &l in &self.0 {
            if l >= 0 {
                *sizes.entry(l as usize).or_insert(0) += 1;
            }
        }
        sizes
    }

    /// Labels with noise as `None`.
    pub fn to_options(&self) -> Vec<Option<usize>> {
        self.0
            .iter()
            .map(|&l| if l >= 0 { Some(l as usize) } else { None })
            .collect()
    }
}

impl From<Vec<i32>> for Labeling {
    fn from(labels: Vec<i32>) -> Self {
        Self(labels)
    }
}

/// Attach `labeling` to `points`, one label per point.
pub fn attach_labels(points: &mut [Point], labeling: &Labeling) -> Result<()> {
    if points.len() != labeling.len() {
        return Err(Error::LengthMismatch {
            expected: points.len(),
            found: labeling.len(),
        });
    }
    for (point, &label) in points.iter_mut().zip(labeling.as_slice()) {
        point.cluster = Some(label);
    }
    Ok(())
}
