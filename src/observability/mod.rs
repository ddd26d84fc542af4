//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handlers, stores, pipeline
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
