//! Profiles, rules and their record stores.
//!
//! # Data Flow
//! ```text
//! CRUD handlers ──put/delete──▶ ProfileStore / RuleStore (file or memory)
//!
//! Live resolution:
//!     RuleStore::list_all → routing::find_best_match → ProfileStore::get
//!     → Profile config, or None (no match / dangling profile)
//! ```
//!
//! # Design Decisions
//! - Rule → Profile is a weak reference; no cascade on profile delete
//! - Stores are trait objects so the server can run on files or in memory

pub mod file_store;
pub mod lookup;
pub mod memory_store;
pub mod store;
pub mod types;

pub use file_store::FileStore;
pub use lookup::find_matching_profile;
pub use memory_store::MemoryStore;
pub use store::{validate_id, ProfileStore, RuleStore, StoreError, StoreResult};
pub use types::{IconKey, LinkConfig, Profile, ProfileConfig, Rule};
