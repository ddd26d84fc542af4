//! Live resolution against the widget-config endpoint.

use async_trait::async_trait;
use url::Url;

use crate::profiles::ProfileConfig;
use crate::widget::page::PageContext;
use crate::widget::resolved::ResolvedConfig;
use crate::widget::source::{ConfigSource, SourceError};

/// Path of the live endpoint relative to the API base.
pub const WIDGET_CONFIG_PATH: &str = "api/widget-config";

/// Asks the server which profile applies to the current page.
#[derive(Debug, Clone)]
pub struct LiveSource {
    client: reqwest::Client,
    api_base: Option<Url>,
}

impl LiveSource {
    /// `api_base` overrides the default of the loader script's origin.
    pub fn new(client: reqwest::Client, api_base: Option<Url>) -> Self {
        Self { client, api_base }
    }

    /// Endpoint URL for a page, including the query string.
    pub fn endpoint(&self, page: &PageContext) -> Result<Url, SourceError> {
        let base = match &self.api_base {
            Some(base) => base.clone(),
            None => page.loader.src.join("/")?,
        };
        let mut url = base.join(WIDGET_CONFIG_PATH)?;
        url.query_pairs_mut()
            .append_pair("domain", &page.domain)
            .append_pair("pathname", &page.pathname);
        Ok(url)
    }
}

#[async_trait]
impl ConfigSource for LiveSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn resolve(&self, page: &PageContext) -> Result<Option<ResolvedConfig>, SourceError> {
        let url = self.endpoint(page)?;
        tracing::debug!(url = %url, "Requesting live widget config");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let config: Option<ProfileConfig> = serde_json::from_slice(&body)?;
        Ok(config.map(ResolvedConfig::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::page::LoaderElement;

    fn page(src: &str) -> PageContext {
        PageContext::new(
            "blog.example.com",
            "/posts/a b",
            LoaderElement::new(Url::parse(src).unwrap()),
        )
    }

    #[test]
    fn test_endpoint_defaults_to_script_origin() {
        let source = LiveSource::new(reqwest::Client::new(), None);
        let url = source.endpoint(&page("https://cdn.example.com/assets/widget.js")).unwrap();
        assert_eq!(url.origin(), Url::parse("https://cdn.example.com").unwrap().origin());
        assert_eq!(url.path(), "/api/widget-config");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("domain".to_string(), "blog.example.com".to_string()),
                ("pathname".to_string(), "/posts/a b".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_with_api_base_prefix() {
        let base = Url::parse("https://api.example.com/widgets/").unwrap();
        let source = LiveSource::new(reqwest::Client::new(), Some(base));
        let url = source.endpoint(&page("https://cdn.example.com/widget.js")).unwrap();
        assert_eq!(url.host_str(), Some("api.example.com"));
        assert_eq!(url.path(), "/widgets/api/widget-config");
    }
}
