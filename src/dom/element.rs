use crate::dom::style::StyleFacts;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DomNode {
    Element(ElementNode),
    Text { text: String },
}

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "ul", "li"), any casing
    pub tag_name: String,

    /// Element attributes in source order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,

    /// Style facts attached to the node by its provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleFacts>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            style: None,
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: add a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder method: append element children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children.extend(children.into_iter().map(DomNode::Element));
        self
    }

    /// Builder method: set style facts
    pub fn with_style(mut self, style: StyleFacts) -> Self {
        self.style = Some(style);
        self
    }

    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(DomNode::Element(child));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(DomNode::Text { text: text.into() });
    }

    /// Get attribute value by name, ignoring ASCII case
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Lowercased tag name
    pub fn tag(&self) -> String {
        self.tag_name.to_lowercase()
    }

    /// Iterate over element children only, skipping text
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|child| match child {
            DomNode::Element(element) => Some(element),
            DomNode::Text { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("UL")
            .with_attribute("id", "menu")
            .with_children(vec![ElementNode::new("li"), ElementNode::new("li")])
            .with_text("tail");

        assert_eq!(element.tag(), "ul");
        assert!(element.is_tag("ul"));
        assert_eq!(element.get_attribute("id"), Some("menu"));
        assert_eq!(element.children.len(), 3);
        assert_eq!(element.element_children().count(), 2);
    }

    #[test]
    fn test_get_attribute_case_insensitive() {
        let element = ElementNode::new("div").with_attribute("Data-Role", "nav");
        assert_eq!(element.get_attribute("data-role"), Some("nav"));
        assert_eq!(element.get_attribute("missing"), None);
    }

    #[test]
    fn test_serialization() {
        let element = ElementNode::new("p")
            .with_attribute("class", "lead")
            .with_text("Hello")
            .with_children(vec![ElementNode::new("em")]);

        let json = serde_json::to_string(&element).unwrap();
        let deserialized: ElementNode = serde_json::from_str(&json).unwrap();

        assert_eq!(element, deserialized);
    }

    #[test]
    fn test_deserialize_mixed_children() {
        let json = r#"{"tag_name":"div","children":[{"text":"hi"},{"tag_name":"span"}]}"#;
        let element: ElementNode = serde_json::from_str(json).unwrap();

        assert_eq!(element.children[0], DomNode::Text { text: "hi".to_string() });
        assert!(matches!(&element.children[1], DomNode::Element(e) if e.is_tag("span")));
    }
}
