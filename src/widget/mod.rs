//! Loader-side configuration resolution.
//!
//! # Data Flow
//! ```text
//! PageContext (domain, pathname, loader element)
//!     → pipeline.rs
//!         1. live.rs      GET {api}/api/widget-config?domain=&pathname=
//!         2. manifest.rs  GET {script dir}/widget-manifest.json
//!                         → routing::find_best_match over snapshot rules
//!         3. inline.rs    loader element data-* attributes
//!     → ResolvedConfig (icons resolved, star URL derived) or None
//! ```
//!
//! # Design Decisions
//! - First source with an answer wins; later sources are never consulted
//! - Sources run sequentially, never concurrently
//! - Every failure is a fallthrough; `None` means the widget is not rendered
//! - Uses the same `routing` module as the server for identical matching

pub mod icons;
pub mod inline;
pub mod live;
pub mod manifest;
pub mod page;
pub mod pipeline;
pub mod resolved;
pub mod source;

pub use icons::{icon_for, Icon};
pub use inline::{parse_inline, InlineSource};
pub use live::LiveSource;
pub use manifest::SnapshotSource;
pub use page::{LoaderElement, PageContext};
pub use pipeline::ResolutionPipeline;
pub use resolved::{ResolvedConfig, ResolvedLink};
pub use source::{ConfigSource, SourceError};
