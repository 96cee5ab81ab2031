use crate::dom::ElementNode;
use crate::error::{DomHashError, Result};
use scraper::{ElementRef, Html, Node};

/// Parse an HTML document and return its `<html>` element.
///
/// Comments, doctypes and processing instructions are dropped; text nodes are kept
/// so that text-aware canonicalization can see them.
pub fn parse_html(html: &str) -> Result<ElementNode> {
    if html.trim().is_empty() {
        return Err(DomHashError::InvalidInput("empty HTML document".to_string()));
    }

    let document = Html::parse_document(html);
    let root = convert_element(document.root_element());
    log::debug!("Parsed HTML document into <{}> root", root.tag_name);
    Ok(root)
}

fn convert_element(element: ElementRef<'_>) -> ElementNode {
    let value = element.value();
    let mut node = ElementNode::new(value.name());
    for (name, attr_value) in value.attrs() {
        node.add_attribute(name, attr_value);
    }

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(convert_element(child_element));
                }
            }
            Node::Text(text) => node.add_text(text.text.to_string()),
            _ => {}
        }
    }
    node
}
