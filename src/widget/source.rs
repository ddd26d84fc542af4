//! Configuration source abstraction.

use async_trait::async_trait;
use thiserror::Error;

use crate::widget::page::PageContext;
use crate::widget::resolved::ResolvedConfig;

/// Why a source could not produce an answer.
///
/// Every variant is an ordinary strategy failure: the pipeline logs it and
/// moves on to the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network unreachable, timeout, connection reset.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One strategy for obtaining render configuration.
///
/// `Ok(None)` means the source worked but has nothing for this page.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn resolve(&self, page: &PageContext) -> Result<Option<ResolvedConfig>, SourceError>;
}
