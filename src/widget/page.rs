//! The hosting page as seen by the loader.

use std::collections::HashMap;

use url::Url;

pub const ATTR_PROJECTS: &str = "data-projects";
pub const ATTR_GITHUB: &str = "data-github";
pub const ATTR_SUBSTACK: &str = "data-substack";
pub const ATTR_COLOR: &str = "data-color";
pub const ATTR_CTA: &str = "data-cta";
pub const ATTR_SHOW_STAR: &str = "data-show-star";

/// The `<script>` element that loaded the widget.
#[derive(Debug, Clone)]
pub struct LoaderElement {
    /// URL the loader script was served from.
    pub src: Url,
    attributes: HashMap<String, String>,
}

impl LoaderElement {
    pub fn new(src: Url) -> Self {
        Self {
            src,
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, treating an empty string as absent.
    fn non_empty(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.is_empty())
    }

    pub fn projects(&self) -> Option<&str> {
        self.non_empty(ATTR_PROJECTS)
    }

    pub fn github(&self) -> Option<&str> {
        self.non_empty(ATTR_GITHUB)
    }

    pub fn substack(&self) -> Option<&str> {
        self.non_empty(ATTR_SUBSTACK)
    }

    pub fn color(&self) -> Option<&str> {
        self.non_empty(ATTR_COLOR)
    }

    pub fn cta(&self) -> Option<&str> {
        self.non_empty(ATTR_CTA)
    }

    /// Absent or `"false"` disables; any other value enables.
    pub fn show_star(&self) -> bool {
        !matches!(self.attribute(ATTR_SHOW_STAR), None | Some("false"))
    }
}

/// One page load: where we are and what loaded us.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Host of the embedding page.
    pub domain: String,
    /// Path of the embedding page.
    pub pathname: String,
    pub loader: LoaderElement,
}

impl PageContext {
    pub fn new(
        domain: impl Into<String>,
        pathname: impl Into<String>,
        loader: LoaderElement,
    ) -> Self {
        Self {
            domain: domain.into(),
            pathname: pathname.into(),
            loader,
        }
    }

    /// Derive domain and pathname from the page URL.
    pub fn from_page_url(page: &Url, loader: LoaderElement) -> Option<Self> {
        let domain = page.host_str()?;
        Some(Self::new(domain, page.path(), loader))
    }
}
