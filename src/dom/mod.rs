//! Element tree model
//!
//! This module provides the read-only tree every fingerprinting pass walks:
//! - ElementNode / DomNode: elements with ordered attributes and mixed element/text children
//! - StyleFacts / ComputedStyle: display-relevant style facts and the capability that resolves them
//! - DomTree: a rooted tree with validation and JSON interchange

pub mod element;
pub mod style;
pub mod tree;

pub use element::{DomNode, ElementNode};
pub use style::{ComputedStyle, ResolvedStyle, StyleFacts, resolve_style};
pub use tree::DomTree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_dom_tree_export() {
        let tree = DomTree::new(ElementNode::new("body"));
        assert_eq!(tree.root.tag_name, "body");
    }
}
