//! In-memory record store.

use dashmap::DashMap;

use crate::profiles::store::{validate_id, ProfileStore, RuleStore, StoreResult};
use crate::profiles::types::{Profile, Rule};

/// Concurrent in-memory store for profiles and rules.
///
/// Listings are sorted by id and ids are checked on write, both to match
/// [`crate::profiles::FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: DashMap<String, Profile>,
    rules: DashMap<String, Rule>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_values<T: Clone>(map: &DashMap<String, T>) -> Vec<T> {
    let mut entries: Vec<(String, T)> = map
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, v)| v).collect()
}

impl ProfileStore for MemoryStore {
    fn get(&self, id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.get(id).map(|r| r.value().clone()))
    }

    fn put(&self, profile: &Profile) -> StoreResult<()> {
        validate_id(&profile.id)?;
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Profile>> {
        Ok(sorted_values(&self.profiles))
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.profiles.remove(id);
        Ok(())
    }
}

impl RuleStore for MemoryStore {
    fn get(&self, id: &str) -> StoreResult<Option<Rule>> {
        Ok(self.rules.get(id).map(|r| r.value().clone()))
    }

    fn put(&self, rule: &Rule) -> StoreResult<()> {
        validate_id(&rule.id)?;
        self.rules.insert(rule.id.clone(), rule.clone());
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Rule>> {
        Ok(sorted_values(&self.rules))
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.rules.remove(id);
        Ok(())
    }
}
