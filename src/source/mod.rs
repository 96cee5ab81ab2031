//! Input acquisition
//!
//! Turns the user-facing input forms into an element tree:
//! - raw HTML text (anything starting with `<`)
//! - an `http(s)` URL, fetched over HTTP, or rendered in headless Chrome with the
//!   `chrome` feature so that computed styles are available
//! - a path to an HTML file

#[cfg(feature = "chrome")]
pub mod chrome;
pub mod fetch;
pub mod html;

pub use fetch::fetch_html;
pub use html::parse_html;

use crate::dom::ElementNode;
use crate::error::{DomHashError, Result};
use std::path::Path;

/// Classified input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource<'a> {
    Html(&'a str),
    Url(&'a str),
    File(&'a Path),
}

impl<'a> InputSource<'a> {
    pub fn classify(input: &'a str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with('<') {
            InputSource::Html(input)
        } else if is_fetchable_url(trimmed) {
            InputSource::Url(trimmed)
        } else {
            InputSource::File(Path::new(trimmed))
        }
    }
}

fn is_fetchable_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read HTML from a raw string, a URL (served markup, no rendering) or a file
pub fn read_input(input: &str) -> Result<String> {
    match InputSource::classify(input) {
        InputSource::Html(html) => Ok(html.to_string()),
        InputSource::Url(url) => fetch_html(url),
        InputSource::File(path) => {
            log::debug!("Reading HTML from {}", path.display());
            std::fs::read_to_string(path).map_err(|source| DomHashError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Acquire the root element for any supported input form.
///
/// With the `chrome` feature URLs are rendered; otherwise the served markup is parsed.
pub fn load_element(input: &str) -> Result<ElementNode> {
    match InputSource::classify(input) {
        #[cfg(feature = "chrome")]
        InputSource::Url(url) => chrome::render_url(url, &chrome::RenderOptions::default()),
        _ => parse_html(&read_input(input)?),
    }
}
