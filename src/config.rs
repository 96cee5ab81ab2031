use crate::compare::ShapeMetric;
use crate::digest::HashAlgorithm;
use crate::error::{DomHashError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how a tree is fingerprinted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomHashOptions {
    /// Digest algorithm for the canonical and layout strings
    pub algorithm: HashAlgorithm,

    /// Allow-list of attribute names (case-insensitive); empty means no allow-list
    pub include_attributes: Vec<String>,

    /// Keep `data-*` and `aria-*` attributes
    pub include_data_and_aria_attributes: bool,

    /// Serialize non-whitespace text children into the canonical string
    pub include_text: bool,

    /// Expose the compressed shape vector in the result
    pub shape_vector: bool,

    /// Extract layout features and compute the layout hash
    pub layout_aware: bool,

    /// Attach the resilience score
    pub resilience: bool,

    /// Attach the structural score
    pub structural: bool,

    /// Attach the compressed structure tree
    pub structure_tree: bool,
}

impl DomHashOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn include_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn include_data_and_aria_attributes(mut self, include: bool) -> Self {
        self.include_data_and_aria_attributes = include;
        self
    }

    pub fn include_text(mut self, include: bool) -> Self {
        self.include_text = include;
        self
    }

    pub fn shape_vector(mut self, enabled: bool) -> Self {
        self.shape_vector = enabled;
        self
    }

    pub fn layout_aware(mut self, enabled: bool) -> Self {
        self.layout_aware = enabled;
        self
    }

    pub fn resilience(mut self, enabled: bool) -> Self {
        self.resilience = enabled;
        self
    }

    pub fn structural(mut self, enabled: bool) -> Self {
        self.structural = enabled;
        self
    }

    pub fn structure_tree(mut self, enabled: bool) -> Self {
        self.structure_tree = enabled;
        self
    }
}

/// Options controlling how two fingerprints are compared
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Metric used for shape vectors
    pub shape_metric: ShapeMetric,

    /// Metric used for layout vectors, independent of `shape_metric`
    pub layout_metric: ShapeMetric,

    /// Include a line-oriented structural diff
    pub diff: bool,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }

    pub fn shape_metric(mut self, metric: ShapeMetric) -> Self {
        self.shape_metric = metric;
        self
    }

    pub fn layout_metric(mut self, metric: ShapeMetric) -> Self {
        self.layout_metric = metric;
        self
    }

    pub fn diff(mut self, enabled: bool) -> Self {
        self.diff = enabled;
        self
    }
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| DomHashError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let opts = DomHashOptions::new()
            .algorithm(HashAlgorithm::Murmur3)
            .include_attributes(["ID", "class"])
            .layout_aware(true)
            .resilience(true);

        assert_eq!(opts.algorithm, HashAlgorithm::Murmur3);
        assert_eq!(opts.include_attributes, vec!["ID", "class"]);
        assert!(opts.layout_aware);
        assert!(opts.resilience);
        assert!(!opts.include_data_and_aria_attributes);
        assert!(!opts.include_text);
    }

    #[test]
    fn test_options_partial_json() {
        let opts: DomHashOptions =
            serde_json::from_str(r#"{"algorithm":"blake3","shape_vector":true}"#).unwrap();

        assert_eq!(opts.algorithm, HashAlgorithm::Blake3);
        assert!(opts.shape_vector);
        assert!(opts.include_attributes.is_empty());
    }

    #[test]
    fn test_compare_options_defaults() {
        let opts = CompareOptions::default();
        assert_eq!(opts.shape_metric, ShapeMetric::Jaccard);
        assert_eq!(opts.layout_metric, ShapeMetric::Jaccard);
        assert!(!opts.diff);

        let opts: CompareOptions = serde_json::from_str(r#"{"layout_metric":"lcs"}"#).unwrap();
        assert_eq!(opts.shape_metric, ShapeMetric::Jaccard);
        assert_eq!(opts.layout_metric, ShapeMetric::Lcs);
    }

    #[test]
    fn test_from_missing_file() {
        let err = DomHashOptions::from_json_file("/nonexistent/domhash.json").unwrap_err();
        assert!(matches!(err, DomHashError::Io { .. }));
    }
}
