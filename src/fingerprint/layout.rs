use crate::dom::{ComputedStyle, ElementNode, resolve_style};
use crate::fingerprint::shape;
use serde::{Deserialize, Serialize};

/// Rendering-relevant facts recorded for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFeature {
    pub tag: String,
    pub display: String,
    pub visibility: String,
    pub opacity: String,
    pub position: String,
    pub is_hidden: bool,
}

impl LayoutFeature {
    /// `tag:display`, the unit of the layout shape vector
    pub fn shape_entry(&self) -> String {
        format!("{}:{}", self.tag, self.display)
    }

    /// `tag:display/position/visibility/opacity/H|V`
    pub fn serialize(&self) -> String {
        format!(
            "{}:{}/{}/{}/{}/{}",
            self.tag,
            self.display,
            self.position,
            self.visibility,
            self.opacity,
            if self.is_hidden { "H" } else { "V" }
        )
    }
}

/// One feature per element in pre-order, resolving style without a computed-style capability
pub fn extract_layout_features(root: &ElementNode) -> Vec<LayoutFeature> {
    extract(root, None)
}

/// Like [`extract_layout_features`], consulting `computed` first for every element
pub fn extract_layout_features_with(root: &ElementNode, computed: &dyn ComputedStyle) -> Vec<LayoutFeature> {
    extract(root, Some(computed))
}

fn extract(root: &ElementNode, computed: Option<&dyn ComputedStyle>) -> Vec<LayoutFeature> {
    let mut features = Vec::new();
    visit(root, computed, &mut features);
    features
}

fn visit(node: &ElementNode, computed: Option<&dyn ComputedStyle>, features: &mut Vec<LayoutFeature>) {
    let style = resolve_style(node, computed);
    let is_hidden = style.is_hidden();
    features.push(LayoutFeature {
        tag: node.tag(),
        display: style.display,
        visibility: style.visibility,
        opacity: style.opacity,
        position: style.position,
        is_hidden,
    });

    for child in node.element_children() {
        visit(child, computed, features);
    }
}

/// Comma-joined layout canonical string
pub fn serialize_layout_features(features: &[LayoutFeature]) -> String {
    features
        .iter()
        .map(LayoutFeature::serialize)
        .collect::<Vec<_>>()
        .join(",")
}

/// Raw `tag:display` entries in pre-order
pub fn layout_entries(features: &[LayoutFeature]) -> Vec<String> {
    features.iter().map(LayoutFeature::shape_entry).collect()
}

/// Run-length compressed `tag:display` shape vector
pub fn layout_shape(features: &[LayoutFeature]) -> Vec<String> {
    shape::compress(&layout_entries(features))
}
