//! Widget profile routing.
//!
//! Resolves which widget profile an embedding page should render, from a set
//! of domain + path-pattern rules. The same matching engine runs in the HTTP
//! service (live rules) and in the loader (prebuilt snapshot).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod profiles;
pub mod routing;
pub mod snapshot;
pub mod widget;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
