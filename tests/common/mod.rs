//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use widget_router::config::{ServerConfig, ShortenerConfig};
use widget_router::profiles::{
    IconKey, LinkConfig, MemoryStore, Profile, ProfileConfig, ProfileStore, Rule, RuleStore,
};
use widget_router::routing::calculate_specificity;
use widget_router::{HttpServer, Shutdown};

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub snapshot_path: PathBuf,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Where an embedding page would load the loader script from.
    pub fn script_src(&self) -> Url {
        Url::parse(&self.url("/loader.js")).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
        let _ = std::fs::remove_file(&self.snapshot_path);
    }
}

fn temp_snapshot_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("widget-router-it-{}", uuid::Uuid::new_v4()))
        .join("widget-manifest.json")
}

/// Start the server with default settings and an empty in-memory store.
pub async fn start_server() -> TestServer {
    start_server_with(|_| {}).await
}

/// Start the server after letting the caller adjust its config.
pub async fn start_server_with(configure: impl FnOnce(&mut ServerConfig)) -> TestServer {
    let snapshot_path = temp_snapshot_path();

    let mut config = ServerConfig::default();
    config.snapshot.path = snapshot_path.to_string_lossy().into_owned();
    configure(&mut config);

    let store = Arc::new(MemoryStore::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store.clone());
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer {
        addr,
        store,
        snapshot_path,
        shutdown,
    }
}

/// Start an arbitrary axum app on an ephemeral port.
pub async fn start_mock_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// A shortener config pointing at a mock upstream.
pub fn shortener_config(api_url: String) -> ShortenerConfig {
    ShortenerConfig {
        api_url,
        api_key: Some("test-key".into()),
        domain: Some("go.example".into()),
    }
}

pub fn profile(id: &str, cta: &str) -> Profile {
    Profile {
        id: id.into(),
        name: format!("{id} profile"),
        config: ProfileConfig {
            cta: cta.into(),
            color: "#222222".into(),
            show_star: true,
            links: vec![LinkConfig {
                label: "Code".into(),
                url: "https://github.com/acme/widget".into(),
                icon: IconKey::Github,
            }],
        },
        created_at: "2024-01-01T00:00:00.000Z".into(),
        updated_at: "2024-01-01T00:00:00.000Z".into(),
    }
}

pub fn rule(id: &str, profile_id: &str, domain: &str, path_pattern: &str) -> Rule {
    Rule {
        id: id.into(),
        profile_id: profile_id.into(),
        domain: domain.into(),
        path_pattern: path_pattern.into(),
        priority: calculate_specificity(path_pattern),
        enabled: true,
    }
}

pub fn seed(store: &MemoryStore, profiles: &[Profile], rules: &[Rule]) {
    for p in profiles {
        ProfileStore::put(store, p).unwrap();
    }
    for r in rules {
        RuleStore::put(store, r).unwrap();
    }
}
