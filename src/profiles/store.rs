//! Record store interfaces.
//!
//! # Design Decisions
//! - Synchronous. Async callers run store calls under `spawn_blocking`
//! - `get` of an absent id is `Ok(None)`
//! - `delete` of an absent id is not an error
//! - Ids name files on disk, so path separators and `..` are rejected

use thiserror::Error;

use crate::profiles::types::{Profile, Rule};

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem failure.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The id cannot name a record.
    #[error("invalid record id '{0}'")]
    InvalidId(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Check that `id` can name a record: non-empty, no path separators, no `..`.
pub fn validate_id(id: &str) -> StoreResult<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Persistent profile records.
pub trait ProfileStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<Option<Profile>>;
    fn put(&self, profile: &Profile) -> StoreResult<()>;
    fn list_all(&self) -> StoreResult<Vec<Profile>>;
    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Persistent rule records.
pub trait RuleStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<Option<Rule>>;
    fn put(&self, rule: &Rule) -> StoreResult<()>;
    fn list_all(&self) -> StoreResult<Vec<Rule>>;
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Rules referencing the given profile.
    fn list_by_profile(&self, profile_id: &str) -> StoreResult<Vec<Rule>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| r.profile_id == profile_id)
            .collect())
    }
}
