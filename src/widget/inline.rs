//! Inline fallback: configuration declared on the loader element itself.

use async_trait::async_trait;
use serde::Deserialize;

use crate::profiles::IconKey;
use crate::widget::icons::icon_for;
use crate::widget::page::{LoaderElement, PageContext};
use crate::widget::resolved::{ResolvedConfig, ResolvedLink};
use crate::widget::source::{ConfigSource, SourceError};

pub const DEFAULT_CTA: &str = "Projects";
pub const DEFAULT_COLOR: &str = "#e63946";

/// Entry of the structured `data-projects` array.
#[derive(Debug, Deserialize)]
struct ProjectEntry {
    #[serde(default)]
    label: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    icon: Option<IconKey>,
}

fn link(label: &str, url: String, category: IconKey) -> ResolvedLink {
    ResolvedLink {
        label: label.to_string(),
        url,
        icon: icon_for(category),
        category,
    }
}

fn comma_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the loader element's attributes into a render configuration.
///
/// Links are merged in order: legacy github repos, legacy substack slugs, then
/// the structured projects array. Malformed projects JSON is discarded, and a
/// malformed entry (such as an unknown icon) skips only that entry. Returns
/// `None` when no links remain.
pub fn parse_inline(loader: &LoaderElement) -> Option<ResolvedConfig> {
    let mut links = Vec::new();

    if let Some(github) = loader.github() {
        for repo in comma_list(github) {
            links.push(link(repo, format!("https://github.com/{repo}"), IconKey::Github));
        }
    }

    if let Some(substack) = loader.substack() {
        for slug in comma_list(substack) {
            links.push(link(slug, format!("https://{slug}.substack.com"), IconKey::Substack));
        }
    }

    if let Some(projects) = loader.projects() {
        match serde_json::from_str::<Vec<serde_json::Value>>(projects) {
            Ok(entries) => {
                for value in entries {
                    let entry = match serde_json::from_value::<ProjectEntry>(value) {
                        Ok(entry) => entry,
                        Err(e) => {
                            tracing::debug!(error = %e, "Skipping malformed data-projects entry");
                            continue;
                        }
                    };
                    if entry.label.is_empty() || entry.url.is_empty() {
                        continue;
                    }
                    let category = entry.icon.unwrap_or(IconKey::Link);
                    links.push(link(&entry.label, entry.url, category));
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed data-projects attribute");
            }
        }
    }

    if links.is_empty() {
        return None;
    }

    Some(ResolvedConfig::new(
        loader.cta().unwrap_or(DEFAULT_CTA).to_string(),
        links,
        loader.color().unwrap_or(DEFAULT_COLOR).to_string(),
        loader.show_star(),
    ))
}

/// Reads configuration from the loader element. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSource;

#[async_trait]
impl ConfigSource for InlineSource {
    fn name(&self) -> &'static str {
        "inline"
    }

    async fn resolve(&self, page: &PageContext) -> Result<Option<ResolvedConfig>, SourceError> {
        Ok(parse_inline(&page.loader))
    }
}
