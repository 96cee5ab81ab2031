use crate::config::DomHashOptions;
use crate::dom::{DomNode, ElementNode};
use crate::fingerprint::shape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attribute-filtered skeleton of one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    /// Lowercased tag name
    pub tag: String,

    /// Sorted, deduplicated, lowercased attribute names; values are discarded
    pub attributes: Vec<String>,

    pub children: Vec<StructureChild>,
}

/// Child entry of a [`StructureNode`]; text only appears in text-aware mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureChild {
    Element(StructureNode),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalizeResult {
    pub canonical: String,
    /// Run-length compressed tag tokens
    pub shape: Vec<String>,
    /// Raw per-element tag list in pre-order
    pub tags: Vec<String>,
    pub tag_count: usize,
    pub depth: usize,
}

/// Walks an element tree and records its canonical skeleton
struct Canonicalizer<'o> {
    options: &'o DomHashOptions,
    allow_list: BTreeSet<String>,
    tags: Vec<String>,
    max_depth: usize,
}

impl<'o> Canonicalizer<'o> {
    fn new(options: &'o DomHashOptions) -> Self {
        Self {
            options,
            allow_list: options.include_attributes.iter().map(|a| a.to_lowercase()).collect(),
            tags: Vec::new(),
            max_depth: 0,
        }
    }

    fn visit(&mut self, node: &ElementNode, depth: usize) -> StructureNode {
        let tag = node.tag();
        self.tags.push(tag.clone());
        self.max_depth = self.max_depth.max(depth);

        let attributes = self.filter_attributes(node);

        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            match child {
                DomNode::Element(element) => {
                    children.push(StructureChild::Element(self.visit(element, depth + 1)));
                }
                DomNode::Text { text } if self.options.include_text && !text.trim().is_empty() => {
                    children.push(StructureChild::Text { text: text.clone() });
                }
                DomNode::Text { .. } => {}
            }
        }

        StructureNode { tag, attributes, children }
    }

    fn filter_attributes(&self, node: &ElementNode) -> Vec<String> {
        // BTreeSet gives sorted, deduplicated names after lowercasing
        node.attributes
            .keys()
            .map(|name| name.to_lowercase())
            .filter(|name| {
                self.options.include_data_and_aria_attributes
                    || !(name.starts_with("data-") || name.starts_with("aria-"))
            })
            .filter(|name| self.allow_list.is_empty() || self.allow_list.contains(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Build the filtered skeleton of `root` without serializing it
pub fn build_structure(root: &ElementNode, options: &DomHashOptions) -> StructureNode {
    Canonicalizer::new(options).visit(root, 0)
}

/// Canonicalize `root` into its serialized skeleton, shape vector and stats
pub fn canonicalize(root: &ElementNode, options: &DomHashOptions) -> CanonicalizeResult {
    let mut canonicalizer = Canonicalizer::new(options);
    let structure = canonicalizer.visit(root, 0);

    let canonical = serialize_structure(&structure);
    let shape = shape::compress(&canonicalizer.tags);

    log::debug!(
        "Canonicalized {} elements (depth {}) into {} shape tokens",
        canonicalizer.tags.len(),
        canonicalizer.max_depth,
        shape.len()
    );

    CanonicalizeResult {
        canonical,
        shape,
        tag_count: canonicalizer.tags.len(),
        tags: canonicalizer.tags,
        depth: canonicalizer.max_depth,
    }
}

/// Serialize a skeleton as `<tag a b>children</tag>`
pub fn serialize_structure(node: &StructureNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &StructureNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    if !node.attributes.is_empty() {
        out.push(' ');
        out.push_str(&node.attributes.join(" "));
    }
    out.push('>');

    for child in &node.children {
        match child {
            StructureChild::Element(element) => write_node(element, out),
            StructureChild::Text { text } => out.push_str(&escape_text(text)),
        }
    }

    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

/// Escape `&`, `<` and `>` only
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    fn list_page() -> ElementNode {
        ElementNode::new("HTML").with_children(vec![ElementNode::new("Body").with_children(vec![
            ElementNode::new("ul").with_children(vec![
                ElementNode::new("li").with_text("one"),
                ElementNode::new("li").with_text("two"),
                ElementNode::new("li").with_text("three"),
            ]),
            ElementNode::new("p").with_text("a < b & c"),
        ])])
    }

    #[test]
    fn test_structural_mode_is_default() {
        let result = canonicalize(&list_page(), &DomHashOptions::default());
        assert_eq!(
            result.canonical,
            "<html><body><ul><li></li><li></li><li></li></ul><p></p></body></html>"
        );
        assert_eq!(result.shape, vec!["html", "body", "ul", "li*3", "p"]);
        assert_eq!(result.tags.len(), 7);
    }

    #[test]
    fn test_text_aware_mode_escapes() {
        let opts = DomHashOptions::default().include_text(true);
        let result = canonicalize(&ElementNode::new("p").with_text("a < b & \"c\"").with_text("   "), &opts);
        assert_eq!(result.canonical, "<p>a &lt; b &amp; \"c\"</p>");
    }

    #[test]
    fn test_stats_match_tree() {
        let root = list_page();
        let tree = DomTree::new(root.clone());
        let result = canonicalize(&root, &DomHashOptions::default());

        assert_eq!(result.tag_count, tree.count_elements());
        assert_eq!(result.depth, tree.max_depth());
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_leaf_serialization() {
        let result = canonicalize(&ElementNode::new("br"), &DomHashOptions::default());
        assert_eq!(result.canonical, "<br></br>");
        assert_eq!(result.tag_count, 1);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_attributes_sorted() {
        let root = ElementNode::new("div").with_attribute("z", "1").with_attribute("a", "2");
        let result = canonicalize(&root, &DomHashOptions::default());
        assert_eq!(result.canonical, "<div a z></div>");
    }

    #[test]
    fn test_data_and_aria_attributes_excluded_by_default() {
        let root = ElementNode::new("div")
            .with_attribute("data-foo", "x")
            .with_attribute("aria-label", "y");

        let result = canonicalize(&root, &DomHashOptions::default());
        assert_eq!(result.canonical, "<div></div>");

        let opts = DomHashOptions::default().include_data_and_aria_attributes(true);
        let result = canonicalize(&root, &opts);
        assert_eq!(result.canonical, "<div aria-label data-foo></div>");
    }

    #[test]
    fn test_allow_list_and_data_filter_both_apply() {
        let root = ElementNode::new("a")
            .with_attribute("HREF", "/")
            .with_attribute("class", "btn")
            .with_attribute("data-id", "7");

        let opts = DomHashOptions::default().include_attributes(["href", "Data-Id"]);
        assert_eq!(canonicalize(&root, &opts).canonical, "<a href></a>");

        let opts = opts.include_data_and_aria_attributes(true);
        assert_eq!(canonicalize(&root, &opts).canonical, "<a data-id href></a>");
    }

    #[test]
    fn test_attribute_casings_collapse() {
        let root = ElementNode::new("div").with_attribute("ID", "a").with_attribute("id", "b");
        let structure = build_structure(&root, &DomHashOptions::default());
        assert_eq!(structure.attributes, vec!["id"]);
    }
}
