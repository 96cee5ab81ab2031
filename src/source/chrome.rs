use crate::dom::{DomTree, ElementNode};
use crate::error::{DomHashError, Result};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Options for the headless browser used to render remote pages
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Run without a visible window
    pub headless: bool,

    /// Window size used for layout
    pub window_width: u32,
    pub window_height: u32,

    /// Chrome sandboxing
    pub sandbox: bool,

    /// How long to wait for navigation
    pub navigation_timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            sandbox: true,
            navigation_timeout: Duration::from_secs(30),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Load `url` in headless Chrome and extract the rendered tree with computed styles
pub fn render_url(url: &str, options: &RenderOptions) -> Result<ElementNode> {
    let mut launch_opts = headless_chrome::LaunchOptions::default();
    launch_opts.headless = options.headless;
    launch_opts.sandbox = options.sandbox;
    launch_opts.window_size = Some((options.window_width, options.window_height));
    launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

    let browser = Browser::new(launch_opts).map_err(|e| DomHashError::BrowserFailed(format!("Failed to launch browser: {}", e)))?;
    let tab = browser
        .new_tab()
        .map_err(|e| DomHashError::BrowserFailed(format!("Failed to create tab: {}", e)))?;
    tab.set_default_timeout(options.navigation_timeout);

    log::info!("Rendering {} in headless Chrome", url);
    tab.navigate_to(url)
        .map_err(|e| DomHashError::BrowserFailed(format!("Failed to navigate to {}: {}", url, e)))?
        .wait_until_navigated()
        .map_err(|e| DomHashError::BrowserFailed(format!("Navigation timeout: {}", e)))?;

    extract_from_tab(&tab)
}

/// Run the extraction script in `tab` and deserialize its result
pub fn extract_from_tab(tab: &Arc<Tab>) -> Result<ElementNode> {
    let js_code = include_str!("extract_dom.js");

    let result = tab
        .evaluate(js_code, false)
        .map_err(|e| DomHashError::BrowserFailed(format!("Failed to execute DOM extraction script: {}", e)))?;

    let json_value = result
        .value
        .ok_or_else(|| DomHashError::BrowserFailed("No value returned from DOM extraction".to_string()))?;

    // The script returns a JSON string rather than an object
    let json_str: String = serde_json::from_value(json_value)?;
    let tree = DomTree::from_json(&json_str)?;
    Ok(tree.root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let opts = RenderOptions::new().headless(false).window_size(800, 600).sandbox(false);

        assert!(!opts.headless);
        assert!(!opts.sandbox);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    // Requires Chrome to be installed
    #[test]
    #[ignore]
    fn test_render_data_url() {
        let root = render_url(
            "data:text/html,<html><body><p style='display:none'>x</p></body></html>",
            &RenderOptions::default(),
        )
        .expect("Failed to render page");

        assert!(root.is_tag("html"));
        let body = root.element_children().find(|e| e.is_tag("body")).expect("body");
        let p = body.element_children().next().expect("p");
        assert_eq!(p.style.as_ref().and_then(|s| s.display.as_deref()), Some("none"));
    }
}
