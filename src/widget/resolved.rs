//! Final render configuration handed to the widget renderer.

use serde::Serialize;

use crate::profiles::{IconKey, LinkConfig, ProfileConfig};
use crate::widget::icons::{icon_for, Icon};

/// A link with its icon resolved to a concrete asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub label: String,
    pub url: String,
    pub icon: Icon,
    /// Category the icon was resolved from.
    pub category: IconKey,
}

impl From<&LinkConfig> for ResolvedLink {
    fn from(link: &LinkConfig) -> Self {
        Self {
            label: link.label.clone(),
            url: link.url.clone(),
            icon: icon_for(link.icon),
            category: link.icon,
        }
    }
}

/// Everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub cta: String,
    pub links: Vec<ResolvedLink>,
    pub color: String,
    /// URL of the first code-hosting link. Derived, never stored.
    pub star_url: Option<String>,
    pub show_star: bool,
}

impl ResolvedConfig {
    /// Build from raw parts, deriving the star URL from `links`.
    pub fn new(cta: String, links: Vec<ResolvedLink>, color: String, show_star: bool) -> Self {
        let star_url = links
            .iter()
            .find(|l| l.category == IconKey::CODE_HOSTING)
            .map(|l| l.url.clone());
        Self {
            cta,
            links,
            color,
            star_url,
            show_star,
        }
    }
}

impl From<&ProfileConfig> for ResolvedConfig {
    fn from(config: &ProfileConfig) -> Self {
        Self::new(
            config.cta.clone(),
            config.links.iter().map(ResolvedLink::from).collect(),
            config.color.clone(),
            config.show_star,
        )
    }
}

impl From<ProfileConfig> for ResolvedConfig {
    fn from(config: ProfileConfig) -> Self {
        Self::from(&config)
    }
}
