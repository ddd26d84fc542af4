//! Configuration schema definitions.
//!
//! `ServerConfig` drives the HTTP service and the snapshot build;
//! `LoaderConfig` drives the loader-side resolution pipeline.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::widget::manifest::DEFAULT_MANIFEST_NAME;

/// Root configuration for the widget service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Record store locations.
    pub store: StoreConfig,

    /// Snapshot artifact location and serving route.
    pub snapshot: SnapshotConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Optional link shortener capability.
    pub shortener: Option<ShortenerConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where profile and rule records live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory of `<id>.json` profile records.
    pub profiles_dir: String,

    /// Directory of `<id>.json` rule records.
    pub rules_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            profiles_dir: "profiles/profiles".to_string(),
            rules_dir: "profiles/rules".to_string(),
        }
    }
}

/// Snapshot artifact settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Output path of the build step, also the file served over HTTP.
    pub path: String,

    /// HTTP route the artifact is served at.
    pub route: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: format!("dist/{DEFAULT_MANIFEST_NAME}"),
            route: format!("/{DEFAULT_MANIFEST_NAME}"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// `json` for machine-readable logs, anything else for human output.
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Link shortener (short.io compatible) settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Link creation endpoint.
    pub api_url: String,

    /// API key. Falls back to `SHORTIO_API_KEY`.
    pub api_key: Option<String>,

    /// Short link domain. Falls back to `SHORTIO_DOMAIN`.
    pub domain: Option<String>,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.short.io/links".to_string(),
            api_key: None,
            domain: None,
        }
    }
}

impl ShortenerConfig {
    /// Fill missing credentials from the environment.
    pub fn with_env_fallback(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var("SHORTIO_API_KEY").ok().filter(|v| !v.is_empty());
        }
        if self.domain.is_none() {
            self.domain = std::env::var("SHORTIO_DOMAIN").ok().filter(|v| !v.is_empty());
        }
        self
    }
}

/// Loader-side settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base URL of the API. Defaults to the loader script's origin. Keep a
    /// trailing slash to preserve a path prefix.
    pub api_base: Option<Url>,

    /// Snapshot file name, resolved relative to the loader script URL.
    pub manifest_name: String,

    /// Per-request timeout for live and snapshot fetches, in seconds.
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            timeout_secs: 10,
        }
    }
}
