//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared with the HTTP server and the snapshot build
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_loader_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LoaderConfig, ObservabilityConfig, ServerConfig, ShortenerConfig,
    SnapshotConfig, StoreConfig, TimeoutConfig,
};
pub use validation::ValidationError;
