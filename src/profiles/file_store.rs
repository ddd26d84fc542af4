//! JSON-file record store: one `<id>.json` per record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::profiles::store::{validate_id, ProfileStore, RuleStore, StoreResult};
use crate::profiles::types::{Profile, Rule};

/// A directory of JSON records of one type.
#[derive(Debug, Clone)]
struct JsonDir {
    dir: PathBuf,
}

impl JsonDir {
    fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn read<T: DeserializeOwned>(&self, id: &str) -> StoreResult<Option<T>> {
        match fs::read_to_string(self.record_path(id)?) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(record) => Ok(Some(record)),
                Err(e) => {
                    tracing::warn!(
                        dir = ?self.dir,
                        id = %id,
                        error = %e,
                        "Skipping unparseable record"
                    );
                    Ok(None)
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize>(&self, id: &str, record: &T) -> StoreResult<()> {
        let path = self.record_path(id)?;
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(record)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Record ids sorted by file name so listing order is stable.
    fn ids(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn list<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let mut records = Vec::new();
        for id in self.ids()? {
            match self.read(&id) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        dir = ?self.dir,
                        id = %id,
                        error = %e,
                        "Skipping unreadable record"
                    );
                }
            }
        }
        Ok(records)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        match fs::remove_file(self.record_path(id)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Profiles and rules stored as JSON files in two directories.
#[derive(Debug, Clone)]
pub struct FileStore {
    profiles: JsonDir,
    rules: JsonDir,
}

impl FileStore {
    /// Create a store over the given directories. Nothing is touched until first use.
    pub fn new(profiles_dir: impl AsRef<Path>, rules_dir: impl AsRef<Path>) -> Self {
        Self {
            profiles: JsonDir::new(profiles_dir.as_ref()),
            rules: JsonDir::new(rules_dir.as_ref()),
        }
    }
}

impl ProfileStore for FileStore {
    fn get(&self, id: &str) -> StoreResult<Option<Profile>> {
        self.profiles.read(id)
    }

    fn put(&self, profile: &Profile) -> StoreResult<()> {
        self.profiles.write(&profile.id, profile)
    }

    fn list_all(&self) -> StoreResult<Vec<Profile>> {
        self.profiles.list()
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.profiles.remove(id)
    }
}

impl RuleStore for FileStore {
    fn get(&self, id: &str) -> StoreResult<Option<Rule>> {
        self.rules.read(id)
    }

    fn put(&self, rule: &Rule) -> StoreResult<()> {
        self.rules.write(&rule.id, rule)
    }

    fn list_all(&self) -> StoreResult<Vec<Rule>> {
        self.rules.list()
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.rules.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::store::StoreError;
    use crate::profiles::types::ProfileConfig;
    use uuid::Uuid;

    fn temp_store() -> (FileStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("widget-router-store-{}", Uuid::new_v4()));
        let store = FileStore::new(root.join("profiles"), root.join("rules"));
        (store, root)
    }

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("Profile {id}"),
            config: ProfileConfig {
                cta: "Projects".into(),
                color: "#000".into(),
                show_star: false,
                links: Vec::new(),
            },
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn rule(id: &str, profile_id: &str) -> Rule {
        Rule {
            id: id.to_string(),
            profile_id: profile_id.to_string(),
            domain: "x.com".into(),
            path_pattern: "/".into(),
            priority: 1,
            enabled: true,
        }
    }

    #[test]
    fn test_missing_directories_list_empty() {
        let (store, _root) = temp_store();
        assert!(ProfileStore::list_all(&store).unwrap().is_empty());
        assert!(RuleStore::list_all(&store).unwrap().is_empty());
        assert!(ProfileStore::get(&store, "nope").unwrap().is_none());
    }

    #[test]
    fn test_profile_crud() {
        let (store, root) = temp_store();
        let p = profile("p1");
        ProfileStore::put(&store, &p).unwrap();
        assert_eq!(ProfileStore::get(&store, "p1").unwrap(), Some(p));

        ProfileStore::delete(&store, "p1").unwrap();
        assert!(ProfileStore::get(&store, "p1").unwrap().is_none());
        // Deleting twice is fine
        ProfileStore::delete(&store, "p1").unwrap();

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn test_rules_listed_in_id_order_and_by_profile() {
        let (store, root) = temp_store();
        RuleStore::put(&store, &rule("b", "p1")).unwrap();
        RuleStore::put(&store, &rule("a", "p2")).unwrap();
        RuleStore::put(&store, &rule("c", "p1")).unwrap();

        let ids: Vec<String> = RuleStore::list_all(&store)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let ids: Vec<String> = store
            .list_by_profile("p1")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn test_junk_files_are_skipped() {
        let (store, root) = temp_store();
        RuleStore::put(&store, &rule("good", "p1")).unwrap();
        let rules_dir = root.join("rules");
        fs::write(rules_dir.join("bad.json"), "{ not json").unwrap();
        fs::write(rules_dir.join("notes.txt"), "hello").unwrap();

        let rules = RuleStore::list_all(&store).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "good");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn test_ids_cannot_escape_the_store() {
        let (store, root) = temp_store();
        let escaped = root.join("escaped.json");

        let err = RuleStore::put(&store, &rule("../escaped", "p1")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
        assert!(!escaped.exists());

        fs::create_dir_all(&root).unwrap();
        fs::write(&escaped, "{}").unwrap();
        assert!(matches!(
            ProfileStore::get(&store, "../escaped"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            ProfileStore::delete(&store, "../escaped"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(escaped.exists());

        let _ = fs::remove_dir_all(root);
    }
}
