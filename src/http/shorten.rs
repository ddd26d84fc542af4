//! Short-link creation, proxied to a short.io compatible API.
//!
//! The capability exists only when an API key and domain are configured.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::ShortenerConfig;
use crate::http::error::{json_body, ApiError};
use crate::http::server::AppState;

/// Configured link shortener client.
#[derive(Debug, Clone)]
pub struct Shortener {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    domain: String,
}

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(rename = "originalURL")]
    pub original_url: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    #[serde(rename = "shortURL")]
    pub short_url: String,
    pub slug: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
}

#[derive(Debug, Serialize)]
struct UpstreamRequest<'a> {
    #[serde(rename = "originalURL")]
    original_url: &'a str,
    domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct UpstreamLink {
    #[serde(rename = "shortURL")]
    short_url: String,
    path: String,
    #[serde(rename = "originalURL")]
    original_url: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: Option<String>,
}

impl Shortener {
    /// Build from config, falling back to `SHORTIO_*` environment variables.
    /// Returns `None` unless both credentials are present.
    pub fn from_config(config: ShortenerConfig) -> Option<Self> {
        let config = config.with_env_fallback();
        Some(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url,
            api_key: config.api_key?,
            domain: config.domain?,
        })
    }

    pub async fn shorten(
        &self,
        original_url: &str,
        slug: Option<&str>,
    ) -> Result<ShortenResponse, ApiError> {
        let request = UpstreamRequest {
            original_url,
            domain: &self.domain,
            path: slug.filter(|s| !s.is_empty()),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Link shortener unreachable");
                ApiError::Internal("Failed to communicate with link shortener".into())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<UpstreamError>()
                .await
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| "Failed to create short link".to_string());
            let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(ApiError::Upstream { status, message });
        }

        let link: UpstreamLink = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Link shortener returned malformed body");
            ApiError::Internal("Failed to communicate with link shortener".into())
        })?;

        Ok(ShortenResponse {
            short_url: link.short_url,
            slug: link.path,
            original_url: link.original_url,
        })
    }
}

/// POST /api/shorten
pub async fn shorten(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, ApiError> {
    let Some(shortener) = state.shortener.as_ref() else {
        return Err(ApiError::ServiceUnavailable(
            "Link shortener not configured. Set SHORTIO_API_KEY and SHORTIO_DOMAIN".into(),
        ));
    };

    let body = json_body(payload)?;
    let original_url = body
        .original_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("originalURL is required".into()))?;

    let link = shortener.shorten(&original_url, body.slug.as_deref()).await?;
    tracing::info!(short_url = %link.short_url, "Short link created");
    Ok(Json(link))
}
