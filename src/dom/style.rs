//! Display-relevant style facts and how they are resolved for an element.
//!
//! Resolution is done per field, first match wins:
//! 1. computed style: a [`ComputedStyle`] capability handed to the extractor, then
//!    [`ElementNode::style`] facts marked `computed` by their provider (e.g. a live browser)
//! 2. the element's inline `style` attribute, matched as `property: value`
//! 3. the element's own unmarked [`ElementNode::style`] facts
//! 4. the defaults `block`, `visible`, `1`, `static`
//!
//! Resolved values are trimmed, lowercased and stripped of `!important`.

use crate::dom::element::ElementNode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const DEFAULT_DISPLAY: &str = "block";
pub const DEFAULT_VISIBILITY: &str = "visible";
pub const DEFAULT_OPACITY: &str = "1";
pub const DEFAULT_POSITION: &str = "static";

static INLINE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(display|visibility|opacity|position)\s*:\s*([^;]+)")
        .expect("inline style pattern")
});

/// Partial style facts; any field may be unknown
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Facts come from the rendering engine's computed style and outrank inline declarations
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
}

impl StyleFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, value: impl Into<String>) -> Self {
        self.display = Some(value.into());
        self
    }

    pub fn visibility(mut self, value: impl Into<String>) -> Self {
        self.visibility = Some(value.into());
        self
    }

    pub fn opacity(mut self, value: impl Into<String>) -> Self {
        self.opacity = Some(value.into());
        self
    }

    pub fn position(mut self, value: impl Into<String>) -> Self {
        self.position = Some(value.into());
        self
    }

    pub fn computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    /// Parse the recognised declarations out of an inline `style` string.
    /// Later declarations of the same property override earlier ones.
    pub fn from_inline(style: &str) -> Self {
        let mut facts = Self::default();
        for caps in INLINE_DECLARATION.captures_iter(style) {
            let value = normalize_value(&caps[2]);
            if value.is_empty() {
                continue;
            }
            match caps[1].to_ascii_lowercase().as_str() {
                "display" => facts.display = Some(value),
                "visibility" => facts.visibility = Some(value),
                "opacity" => facts.opacity = Some(value),
                "position" => facts.position = Some(value),
                _ => {}
            }
        }
        facts
    }

    /// Fill every unknown field from `fallback`
    fn or(self, fallback: &StyleFacts) -> Self {
        Self {
            display: self.display.or_else(|| fallback.display.clone()),
            visibility: self.visibility.or_else(|| fallback.visibility.clone()),
            opacity: self.opacity.or_else(|| fallback.opacity.clone()),
            position: self.position.or_else(|| fallback.position.clone()),
            computed: self.computed,
        }
    }
}

/// Fully resolved style facts for one element
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
    pub position: String,
}

impl ResolvedStyle {
    /// `display: none`, `visibility: hidden` or a zero opacity
    pub fn is_hidden(&self) -> bool {
        self.display == "none" || self.visibility == "hidden" || opacity_is_zero(&self.opacity)
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
            visibility: DEFAULT_VISIBILITY.to_string(),
            opacity: DEFAULT_OPACITY.to_string(),
            position: DEFAULT_POSITION.to_string(),
        }
    }
}

/// Trim, drop a trailing `!important` and lowercase a declared value
pub fn normalize_value(value: &str) -> String {
    let mut value = value.trim();
    let lower = value.to_ascii_lowercase();
    if let Some(stripped) = lower.strip_suffix("important") {
        if let Some(head) = stripped.trim_end().strip_suffix('!') {
            value = value[..head.len()].trim_end();
        }
    }
    value.to_ascii_lowercase()
}

fn opacity_is_zero(opacity: &str) -> bool {
    match opacity.trim().parse::<f64>() {
        Ok(value) => value == 0.0,
        Err(_) => {
            log::warn!("Unparseable opacity value {:?}, treating as visible", opacity);
            false
        }
    }
}

/// Style-resolution capability implemented by an element tree provider
pub trait ComputedStyle {
    /// Computed style facts for `element`, or `None` when unavailable
    fn computed(&self, element: &ElementNode) -> Option<StyleFacts>;
}

/// Resolve the style facts of a single element through all tiers
pub fn resolve_style(element: &ElementNode, computed: Option<&dyn ComputedStyle>) -> ResolvedStyle {
    let own = element.style.as_ref();
    let mut facts = computed
        .and_then(|source| source.computed(element))
        .unwrap_or_default();

    if let Some(attached) = own.filter(|style| style.computed) {
        facts = facts.or(attached);
    }
    if let Some(inline) = element.get_attribute("style") {
        facts = facts.or(&StyleFacts::from_inline(inline));
    }
    if let Some(declared) = own.filter(|style| !style.computed) {
        facts = facts.or(declared);
    }

    let defaults = ResolvedStyle::default();
    ResolvedStyle {
        display: resolved(facts.display, defaults.display),
        visibility: resolved(facts.visibility, defaults.visibility),
        opacity: resolved(facts.opacity, defaults.opacity),
        position: resolved(facts.position, defaults.position),
    }
}

fn resolved(value: Option<String>, default: String) -> String {
    value
        .map(|value| normalize_value(&value))
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}
