//! Fingerprint comparison
//!
//! This module provides:
//! - metrics: the five similarity measures over canonical strings and token vectors
//! - diff: a best-effort positional diff of canonical strings
//! - ShapeMetric: closed selection of the token-vector measure by name
//! - compare_results: side-by-side comparison of two [`DomHashResult`]s

pub mod diff;
pub mod metrics;

pub use diff::structural_diff;
pub use metrics::{
    compare_layout_vectors, compare_shape_cosine, compare_shape_lcs, compare_shape_vectors,
    compare_structures, compare_tree_edit_distance, levenshtein,
};

use crate::config::CompareOptions;
use crate::error::{DomHashError, Result};
use crate::fingerprint::DomHashResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token-vector similarity measure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMetric {
    #[default]
    Jaccard,
    Lcs,
    Cosine,
    /// Edit distance over joined tokens, see [`compare_tree_edit_distance`]
    Ted,
}

impl ShapeMetric {
    pub const ALL: [ShapeMetric; 4] = [
        ShapeMetric::Jaccard,
        ShapeMetric::Lcs,
        ShapeMetric::Cosine,
        ShapeMetric::Ted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeMetric::Jaccard => "jaccard",
            ShapeMetric::Lcs => "lcs",
            ShapeMetric::Cosine => "cosine",
            ShapeMetric::Ted => "ted",
        }
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ShapeMetric::Jaccard => "Jaccard",
            ShapeMetric::Lcs => "LCS",
            ShapeMetric::Cosine => "Cosine",
            ShapeMetric::Ted => "Tree Edit Distance",
        }
    }

    pub fn compare<S: AsRef<str>>(&self, a: &[S], b: &[S]) -> f64 {
        match self {
            ShapeMetric::Jaccard => compare_shape_vectors(a, b),
            ShapeMetric::Lcs => compare_shape_lcs(a, b),
            ShapeMetric::Cosine => compare_shape_cosine(a, b),
            ShapeMetric::Ted => compare_tree_edit_distance(a, b),
        }
    }
}

impl fmt::Display for ShapeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeMetric {
    type Err = DomHashError;

    fn from_str(s: &str) -> Result<Self> {
        ShapeMetric::ALL
            .into_iter()
            .find(|metric| metric.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomHashError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Compare two shape vectors with the selected measure
pub fn compare_shapes<S: AsRef<str>>(a: &[S], b: &[S], metric: ShapeMetric) -> f64 {
    metric.compare(a, b)
}

/// Compare two layout vectors with an explicitly selected measure
pub fn compare_layout_vectors_with<S: AsRef<str>>(a: &[S], b: &[S], metric: ShapeMetric) -> f64 {
    metric.compare(a, b)
}

/// Aggregate comparison of two fingerprints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub hash_a: String,
    pub hash_b: String,
    /// Edit-distance similarity of the canonical strings
    pub similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_metric: Option<ShapeMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_metric: Option<ShapeMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<String>>,
}

/// Compare two fingerprints.
///
/// Shape and layout similarity are only reported when both sides carry the
/// corresponding vector.
pub fn compare_results(a: &DomHashResult, b: &DomHashResult, options: &CompareOptions) -> ComparisonResult {
    let similarity = compare_structures(&a.canonical, &b.canonical);

    let shape_similarity = match (&a.shape, &b.shape) {
        (Some(shape_a), Some(shape_b)) => Some(options.shape_metric.compare(shape_a, shape_b)),
        _ => None,
    };
    let layout_similarity = match (&a.layout_shape, &b.layout_shape) {
        (Some(layout_a), Some(layout_b)) => {
            Some(compare_layout_vectors_with(layout_a, layout_b, options.layout_metric))
        }
        _ => None,
    };

    log::debug!(
        "Compared fingerprints: similarity={:.4} shape={:?} layout={:?}",
        similarity,
        shape_similarity,
        layout_similarity
    );

    ComparisonResult {
        hash_a: a.hash.clone(),
        hash_b: b.hash.clone(),
        similarity,
        shape_metric: shape_similarity.map(|_| options.shape_metric),
        shape_similarity,
        layout_metric: layout_similarity.map(|_| options.layout_metric),
        layout_similarity,
        diff: options.diff.then(|| structural_diff(&a.canonical, &b.canonical)),
    }
}
