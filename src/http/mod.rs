//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! Embedding page (any origin)
//!     → widget_config.rs  GET/OPTIONS /api/widget-config  (CORS: *)
//!     → snapshot.rs       GET/OPTIONS /widget-manifest.json (CORS: *)
//!
//! Admin tooling
//!     → profiles.rs / rules.rs  CRUD over the record stores
//!     → shorten.rs              short-link capability (optional)
//!
//! All handlers → error.rs (ApiError → {"error": "..."} + status)
//! ```

pub mod error;
pub mod profiles;
pub mod rules;
pub mod server;
pub mod shorten;
pub mod snapshot;
pub mod widget_config;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
