//! Snapshot fallback: resolve locally against the prebuilt manifest.

use async_trait::async_trait;
use url::Url;

use crate::routing::find_best_match;
use crate::snapshot::Snapshot;
use crate::widget::page::PageContext;
use crate::widget::resolved::ResolvedConfig;
use crate::widget::source::{ConfigSource, SourceError};

/// Default manifest file name, served next to the loader script.
pub const DEFAULT_MANIFEST_NAME: &str = "widget-manifest.json";

/// Fetches the snapshot artifact and runs the rule resolver over it.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    client: reqwest::Client,
    manifest_name: String,
}

impl SnapshotSource {
    pub fn new(client: reqwest::Client, manifest_name: impl Into<String>) -> Self {
        Self {
            client,
            manifest_name: manifest_name.into(),
        }
    }

    /// Manifest URL, relative to the loader script.
    pub fn manifest_url(&self, page: &PageContext) -> Result<Url, SourceError> {
        Ok(page.loader.src.join(&self.manifest_name)?)
    }

    async fn fetch(&self, url: Url) -> Result<Snapshot, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Resolve a page against an already-loaded snapshot.
pub fn resolve_in_snapshot(snapshot: &Snapshot, page: &PageContext) -> Option<ResolvedConfig> {
    find_best_match(&page.domain, &page.pathname, &snapshot.rules)
        .map(|rule| ResolvedConfig::from(&rule.config))
}

#[async_trait]
impl ConfigSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn resolve(&self, page: &PageContext) -> Result<Option<ResolvedConfig>, SourceError> {
        let url = self.manifest_url(page)?;
        tracing::debug!(url = %url, "Fetching widget manifest");
        let snapshot = self.fetch(url).await?;
        Ok(resolve_in_snapshot(&snapshot, page))
    }
}
