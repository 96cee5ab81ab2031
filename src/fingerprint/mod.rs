//! Structure-aware fingerprinting
//!
//! Independent passes over one element tree:
//! - canonicalizer: canonical string, run-length shape vector and stats
//! - layout: per-element display facts and the layout canonical string
//! - structure: nested shape tree with identical sibling runs collapsed
//!
//! [`domhash`] runs the passes selected by [`DomHashOptions`] and digests the results.

pub mod canonicalizer;
pub mod layout;
pub mod shape;
pub mod structure;

pub use canonicalizer::{CanonicalizeResult, StructureChild, StructureNode, build_structure, canonicalize, serialize_structure};
pub use layout::{
    LayoutFeature, extract_layout_features, extract_layout_features_with, layout_entries, layout_shape,
    serialize_layout_features,
};
pub use structure::{DomNodeShape, extract_dom_structure_tree};

use crate::config::DomHashOptions;
use crate::digest::digest;
use crate::dom::{ComputedStyle, ElementNode};
use crate::error::Result;
use crate::score::{ScoreBreakdown, compute_resilience_score, compute_structural_score};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub tag_count: usize,
    pub depth: usize,
}

/// Fingerprint of one element tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomHashResult {
    /// Digest of the canonical string
    pub hash: String,
    pub canonical: String,
    pub stats: Stats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_shape: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resilience: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_tree: Option<DomNodeShape>,
}

/// Fingerprint `root` according to `options`.
///
/// Fails only at the digest boundary (e.g. minhash over a canonical string
/// shorter than one shingle).
pub fn domhash(root: &ElementNode, options: &DomHashOptions) -> Result<DomHashResult> {
    domhash_with(root, options, None)
}

/// Like [`domhash`], resolving layout facts through `computed` before any
/// style information carried by the tree itself
pub fn domhash_with(
    root: &ElementNode,
    options: &DomHashOptions,
    computed: Option<&dyn ComputedStyle>,
) -> Result<DomHashResult> {
    let structure = canonicalize(root, options);
    let hash = digest(&structure.canonical, options.algorithm)?;
    log::debug!("Structure hash ({}): {}", options.algorithm, hash);

    let needs_layout = options.layout_aware || options.structure_tree;
    let features = match (needs_layout, computed) {
        (false, _) => Vec::new(),
        (true, Some(computed)) => extract_layout_features_with(root, computed),
        (true, None) => extract_layout_features(root),
    };

    let mut result = DomHashResult {
        hash,
        canonical: structure.canonical,
        stats: Stats {
            tag_count: structure.tag_count,
            depth: structure.depth,
        },
        shape: options.shape_vector.then_some(structure.shape),
        layout_hash: None,
        layout_canonical: None,
        layout_shape: None,
        resilience: None,
        structural: None,
        structure_tree: None,
    };

    let entries = layout_entries(&features);
    if options.layout_aware {
        let layout_canonical = serialize_layout_features(&features);
        let layout_hash = digest(&layout_canonical, options.algorithm)?;
        log::debug!("Layout hash ({}): {}", options.algorithm, layout_hash);

        result.layout_hash = Some(layout_hash);
        result.layout_canonical = Some(layout_canonical);
        result.layout_shape = Some(shape::compress(&entries));
    }

    if options.resilience {
        let layout = options.layout_aware.then_some(entries.as_slice());
        result.resilience = Some(compute_resilience_score(&structure.tags, layout));
    }
    if options.structural {
        result.structural = Some(compute_structural_score(&structure.tags));
    }
    if options.structure_tree {
        let hidden: Vec<bool> = features.iter().map(|f| f.is_hidden).collect();
        result.structure_tree = Some(extract_dom_structure_tree(root, Some(&hidden)));
    }

    Ok(result)
}
