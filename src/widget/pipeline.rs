//! Ordered fallback over configuration sources.

use std::time::Duration;

use crate::config::LoaderConfig;
use crate::observability::metrics;
use crate::widget::inline::InlineSource;
use crate::widget::live::LiveSource;
use crate::widget::manifest::SnapshotSource;
use crate::widget::page::PageContext;
use crate::widget::resolved::ResolvedConfig;
use crate::widget::source::ConfigSource;

/// Tries each source in order and stops at the first one with an answer.
///
/// Sources run strictly one after another. Failures and misses are logged and
/// counted, never returned: `None` means "do not render the widget".
pub struct ResolutionPipeline {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ResolutionPipeline {
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Live endpoint, then snapshot, then inline attributes.
    pub fn standard(config: &LoaderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::new(vec![
            Box::new(LiveSource::new(client.clone(), config.api_base.clone())),
            Box::new(SnapshotSource::new(client, config.manifest_name.clone())),
            Box::new(InlineSource),
        ]))
    }

    /// Names of the configured sources, in order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve(&self, page: &PageContext) -> Option<ResolvedConfig> {
        for source in &self.sources {
            let strategy = source.name();
            match source.resolve(page).await {
                Ok(Some(config)) => {
                    tracing::debug!(
                        strategy,
                        domain = %page.domain,
                        pathname = %page.pathname,
                        "Widget config resolved"
                    );
                    metrics::record_resolution(strategy, metrics::Outcome::Hit);
                    return Some(config);
                }
                Ok(None) => {
                    tracing::debug!(
                        strategy,
                        domain = %page.domain,
                        pathname = %page.pathname,
                        "No config from source"
                    );
                    metrics::record_resolution(strategy, metrics::Outcome::Miss);
                }
                Err(e) => {
                    tracing::warn!(strategy, error = %e, "Config source failed, falling through");
                    metrics::record_resolution(strategy, metrics::Outcome::Failed);
                }
            }
        }

        tracing::info!(
            domain = %page.domain,
            pathname = %page.pathname,
            "No widget config available"
        );
        None
    }
}
