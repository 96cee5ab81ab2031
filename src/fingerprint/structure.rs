use crate::dom::ElementNode;
use serde::{Deserialize, Serialize};

/// Nested shape of an element with identical sibling runs collapsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomNodeShape {
    pub tag: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNodeShape>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<usize>,
}

impl DomNodeShape {
    /// Structural equality on tag, hidden flag and children, ignoring `repeat`
    pub fn same_shape(&self, other: &DomNodeShape) -> bool {
        self.tag == other.tag && self.hidden == other.hidden && self.children == other.children
    }

    /// Number of elements this entry stands for, expanding repeats
    pub fn element_count(&self) -> usize {
        let own = 1 + self.children.iter().map(DomNodeShape::element_count).sum::<usize>();
        own * self.repeat.unwrap_or(1)
    }
}

/// Build the structure tree of `root`.
///
/// `hidden` holds one flag per element in pre-order (the order of
/// [`extract_layout_features`](crate::fingerprint::extract_layout_features));
/// elements past its end, or every element when it is `None`, count as visible.
pub fn extract_dom_structure_tree(root: &ElementNode, hidden: Option<&[bool]>) -> DomNodeShape {
    let mut index = 0;
    build(root, hidden.unwrap_or(&[]), &mut index)
}

fn build(node: &ElementNode, hidden: &[bool], index: &mut usize) -> DomNodeShape {
    let is_hidden = hidden.get(*index).copied().unwrap_or(false);
    *index += 1;

    let children: Vec<DomNodeShape> = node
        .element_children()
        .map(|child| build(child, hidden, index))
        .collect();

    DomNodeShape {
        tag: node.tag(),
        hidden: is_hidden,
        children: collapse_runs(children),
        repeat: None,
    }
}

fn collapse_runs(children: Vec<DomNodeShape>) -> Vec<DomNodeShape> {
    let mut compressed: Vec<DomNodeShape> = Vec::with_capacity(children.len());
    for child in children {
        match compressed.last_mut() {
            Some(last) if last.same_shape(&child) => {
                last.repeat = Some(last.repeat.unwrap_or(1) + 1);
            }
            _ => compressed.push(child),
        }
    }
    compressed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn li(text: &str) -> ElementNode {
        ElementNode::new("li").with_children(vec![ElementNode::new("a").with_text(text)])
    }

    #[test]
    fn test_identical_siblings_collapse() {
        let root = ElementNode::new("ul").with_children(vec![li("one"), li("two")]);
        let tree = extract_dom_structure_tree(&root, None);

        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].tag, "li");
        assert_eq!(tree.children[0].repeat, Some(2));
        assert_eq!(tree.element_count(), 5);
    }

    #[test]
    fn test_different_siblings_stay_separate() {
        let root = ElementNode::new("ul").with_children(vec![
            li("one"),
            ElementNode::new("li"),
            li("three"),
        ]);
        let tree = extract_dom_structure_tree(&root, None);

        assert_eq!(tree.children.len(), 3);
        assert!(tree.children.iter().all(|c| c.repeat.is_none()));
    }

    #[test]
    fn test_hidden_flags_break_runs() {
        let root = ElementNode::new("div").with_children(vec![
            ElementNode::new("p"),
            ElementNode::new("p"),
            ElementNode::new("p"),
        ]);
        let hidden = [false, false, false, true];
        let tree = extract_dom_structure_tree(&root, Some(&hidden));

        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].repeat, Some(2));
        assert!(tree.children[1].hidden);
        assert_eq!(tree.children[1].repeat, None);
    }

    #[test]
    fn test_nested_runs_compare_after_compression() {
        let row = || ElementNode::new("tr").with_children(vec![ElementNode::new("td"), ElementNode::new("td")]);
        let root = ElementNode::new("table").with_children(vec![row(), row(), row()]);
        let tree = extract_dom_structure_tree(&root, None);

        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].repeat, Some(3));
        assert_eq!(tree.children[0].children[0].repeat, Some(2));
    }

    #[test]
    fn test_serialization_omits_defaults() {
        let root = ElementNode::new("ul").with_children(vec![ElementNode::new("li"), ElementNode::new("li")]);
        let json = serde_json::to_string(&extract_dom_structure_tree(&root, None)).unwrap();
        assert_eq!(json, r#"{"tag":"ul","children":[{"tag":"li","repeat":2}]}"#);
    }
}
