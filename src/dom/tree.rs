use crate::dom::element::ElementNode;
use crate::error::{DomHashError, Result};

/// A rooted, read-only element tree handed to the fingerprinting passes
#[derive(Debug, Clone)]
pub struct DomTree {
    /// Root element of the tree
    pub root: ElementNode,
}

impl DomTree {
    pub fn new(root: ElementNode) -> Self {
        Self { root }
    }

    /// Build a tree from the JSON form of an [`ElementNode`], rejecting nameless elements
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)?;
        let tree = Self::new(root);
        tree.validate()?;
        Ok(tree)
    }

    /// Convert the tree to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Ensure every element carries a tag name
    pub fn validate(&self) -> Result<()> {
        Self::validate_recursive(&self.root, "root")
    }

    fn validate_recursive(node: &ElementNode, path: &str) -> Result<()> {
        if node.tag_name.trim().is_empty() {
            return Err(DomHashError::InvalidInput(format!("element at {} has no tag name", path)));
        }
        for (i, child) in node.element_children().enumerate() {
            let child_path = format!("{} > {}:nth-child({})", path, child.tag(), i + 1);
            Self::validate_recursive(child, &child_path)?;
        }
        Ok(())
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        Self::count_elements_recursive(&self.root)
    }

    fn count_elements_recursive(node: &ElementNode) -> usize {
        1 + node.element_children().map(Self::count_elements_recursive).sum::<usize>()
    }

    /// Longest root-to-element edge count (root = 0)
    pub fn max_depth(&self) -> usize {
        Self::max_depth_recursive(&self.root)
    }

    fn max_depth_recursive(node: &ElementNode) -> usize {
        node.element_children()
            .map(|child| 1 + Self::max_depth_recursive(child))
            .max()
            .unwrap_or(0)
    }
}

impl From<ElementNode> for DomTree {
    fn from(root: ElementNode) -> Self {
        Self::new(root)
    }
}
