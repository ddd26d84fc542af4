//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS for widget routes)
//! - Bind server to listener and drain on shutdown

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::shorten::Shortener;
use crate::http::{profiles, rules, shorten, snapshot, widget_config};
use crate::profiles::{ProfileStore, RuleStore};

pub const PROFILES_ROUTE: &str = "/api/profiles";
pub const PROFILE_ROUTE: &str = "/api/profiles/{id}";
pub const RULES_ROUTE: &str = "/api/rules";
pub const RULE_ROUTE: &str = "/api/rules/{id}";
pub const SHORTEN_ROUTE: &str = "/api/shorten";
pub const HEALTH_ROUTE: &str = "/health";

/// Fixed routes the configurable snapshot route must not shadow.
pub const RESERVED_ROUTES: &[&str] = &[
    widget_config::ROUTE,
    PROFILES_ROUTE,
    RULES_ROUTE,
    SHORTEN_ROUTE,
    HEALTH_ROUTE,
];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub rules: Arc<dyn RuleStore>,
    pub snapshot_path: PathBuf,
    pub shortener: Option<Arc<Shortener>>,
}

/// HTTP server for the widget service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server over a store that holds both profiles and rules.
    pub fn new<S>(config: ServerConfig, store: Arc<S>) -> Self
    where
        S: ProfileStore + RuleStore + 'static,
    {
        let shortener = Shortener::from_config(config.shortener.clone().unwrap_or_default())
            .map(Arc::new);
        if shortener.is_none() {
            tracing::info!("Link shortener not configured; /api/shorten will answer 503");
        }

        let state = AppState {
            profiles: store.clone(),
            rules: store,
            snapshot_path: PathBuf::from(&config.snapshot.path),
            shortener,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Routes embedded pages call directly. They answer any origin.
    fn public_routes(config: &ServerConfig) -> Router<AppState> {
        Router::new()
            .route(
                widget_config::ROUTE,
                get(widget_config::get_config).options(widget_config::preflight),
            )
            .route(
                &config.snapshot.route,
                get(snapshot::serve_snapshot).options(widget_config::preflight),
            )
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
    }

    fn api_routes() -> Router<AppState> {
        Router::new()
            .route(PROFILES_ROUTE, get(profiles::list).post(profiles::create))
            .route(
                PROFILE_ROUTE,
                get(profiles::get_by_id)
                    .put(profiles::update)
                    .delete(profiles::delete),
            )
            .route(RULES_ROUTE, get(rules::list).post(rules::create))
            .route(
                RULE_ROUTE,
                get(rules::get_by_id).put(rules::update).delete(rules::delete),
            )
            .route(SHORTEN_ROUTE, post(shorten::shorten))
            .route(HEALTH_ROUTE, get(health))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .merge(Self::public_routes(config))
            .merge(Self::api_routes())
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{MemoryStore, Profile, ProfileConfig, Rule};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server_with(store: Arc<MemoryStore>) -> HttpServer {
        let mut config = ServerConfig::default();
        config.snapshot.path = std::env::temp_dir()
            .join(format!("widget-router-missing-{}.json", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();
        HttpServer::new(config, store)
    }

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        ProfileStore::put(
            store.as_ref(),
            &Profile {
                id: "p1".into(),
                name: "Blog".into(),
                config: ProfileConfig {
                    cta: "Read more".into(),
                    color: "#111".into(),
                    show_star: true,
                    links: Vec::new(),
                },
                created_at: String::new(),
                updated_at: String::new(),
            },
        )
        .unwrap();
        RuleStore::put(
            store.as_ref(),
            &Rule {
                id: "r1".into(),
                profile_id: "p1".into(),
                domain: "x.com".into(),
                path_pattern: "/blog/**".into(),
                priority: 101,
                enabled: true,
            },
        )
        .unwrap();
        store
    }

    async fn send(
        router: Router,
        request: Request<Body>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    fn assert_cors(headers: &axum::http::HeaderMap) {
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn test_widget_config_match() {
        let router = server_with(seeded_store()).router();
        let request = Request::get("/api/widget-config?domain=x.com&pathname=%2Fblog%2F2024%2Fpost")
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&headers);
        assert!(headers.contains_key("x-request-id"));

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["cta"], "Read more");
        assert_eq!(value["showStar"], true);
    }

    #[tokio::test]
    async fn test_widget_config_no_match_is_null() {
        let router = server_with(seeded_store()).router();
        let request = Request::get("/api/widget-config?domain=y.com&pathname=%2Fblog")
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&headers);
        assert_eq!(body, b"null");
    }

    #[tokio::test]
    async fn test_widget_config_missing_params() {
        let router = server_with(seeded_store()).router();
        let request = Request::get("/api/widget-config?domain=x.com")
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_cors(&headers);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Missing domain or pathname" }));
    }

    #[tokio::test]
    async fn test_widget_config_preflight() {
        let router = server_with(seeded_store()).router();
        let request = Request::options("/api/widget-config").body(Body::empty()).unwrap();

        let (status, headers, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&headers);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_crud_routes_have_no_cors_headers() {
        let router = server_with(seeded_store()).router();
        let request = Request::get("/api/rules").body(Body::empty()).unwrap();

        let (status, headers, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        let rules: Vec<Rule> = serde_json::from_slice(&body).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_not_built() {
        let router = server_with(seeded_store()).router();
        let request = Request::get("/widget-manifest.json").body(Body::empty()).unwrap();

        let (status, headers, _) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_cors(&headers);
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_bad_request() {
        let router = server_with(seeded_store()).router();
        let request = Request::post("/api/rules")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ nope"))
            .unwrap();

        let (status, _, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_custom_snapshot_route() {
        let mut config = ServerConfig::default();
        config.snapshot.route = "/static/manifest.json".into();
        config.snapshot.path = std::env::temp_dir()
            .join(format!("widget-router-missing-{}.json", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();
        assert!(crate::config::validation::validate_config(&config).is_ok());

        let router = HttpServer::new(config, seeded_store()).router();
        let request = Request::get("/static/manifest.json").body(Body::empty()).unwrap();
        let (status, headers, _) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_cors(&headers);
    }
}
