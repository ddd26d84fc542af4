//! Live profile lookup for the resolution endpoint.

use crate::profiles::store::{ProfileStore, RuleStore, StoreError, StoreResult};
use crate::profiles::types::Profile;
use crate::routing::find_best_match;

/// Find the profile for `domain` + `pathname` against live records.
///
/// A winning rule whose profile no longer exists yields `Ok(None)`; the next
/// best rule is not consulted.
pub fn find_matching_profile<R, P>(
    rules: &R,
    profiles: &P,
    domain: &str,
    pathname: &str,
) -> StoreResult<Option<Profile>>
where
    R: RuleStore + ?Sized,
    P: ProfileStore + ?Sized,
{
    let all_rules = rules.list_all()?;
    let Some(best) = find_best_match(domain, pathname, &all_rules) else {
        tracing::debug!(domain, pathname, "No rule matched");
        return Ok(None);
    };

    let profile = match profiles.get(&best.profile_id) {
        Err(StoreError::InvalidId(_)) => None,
        other => other?,
    };
    if profile.is_none() {
        tracing::warn!(
            rule_id = %best.id,
            profile_id = %best.profile_id,
            "Matched rule references a missing profile"
        );
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::memory_store::MemoryStore;
    use crate::profiles::types::{ProfileConfig, Rule};
    use crate::routing::calculate_specificity;

    fn profile(id: &str, cta: &str) -> Profile {
        Profile {
            id: id.into(),
            name: id.into(),
            config: ProfileConfig {
                cta: cta.into(),
                color: "#fff".into(),
                show_star: false,
                links: Vec::new(),
            },
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn rule(id: &str, profile_id: &str, pattern: &str) -> Rule {
        Rule {
            id: id.into(),
            profile_id: profile_id.into(),
            domain: "x.com".into(),
            path_pattern: pattern.into(),
            priority: calculate_specificity(pattern),
            enabled: true,
        }
    }

    #[test]
    fn test_returns_profile_of_best_rule() {
        let store = MemoryStore::new();
        ProfileStore::put(&store, &profile("blog", "Blog")).unwrap();
        ProfileStore::put(&store, &profile("home", "Home")).unwrap();
        RuleStore::put(&store, &rule("r1", "blog", "/blog/**")).unwrap();
        RuleStore::put(&store, &rule("r2", "home", "/")).unwrap();

        let found = find_matching_profile(&store, &store, "x.com", "/blog/a/b").unwrap();
        assert_eq!(found.unwrap().config.cta, "Blog");

        let found = find_matching_profile(&store, &store, "x.com", "/").unwrap();
        assert_eq!(found.unwrap().config.cta, "Home");

        assert!(find_matching_profile(&store, &store, "x.com", "/about").unwrap().is_none());
    }

    #[test]
    fn test_dangling_profile_is_no_match() {
        let store = MemoryStore::new();
        ProfileStore::put(&store, &profile("fallback", "Fallback")).unwrap();
        RuleStore::put(&store, &rule("r1", "deleted", "/blog/post-1")).unwrap();
        RuleStore::put(&store, &rule("r2", "fallback", "/blog/*")).unwrap();

        let found = find_matching_profile(&store, &store, "x.com", "/blog/post-1").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_unaddressable_profile_id_is_no_match() {
        let root = std::env::temp_dir()
            .join(format!("widget-router-lookup-{}", uuid::Uuid::new_v4()));
        let store = crate::profiles::FileStore::new(root.join("profiles"), root.join("rules"));
        RuleStore::put(&store, &rule("r1", "../outside", "/")).unwrap();

        let found = find_matching_profile(&store, &store, "x.com", "/").unwrap();
        assert!(found.is_none());

        let _ = std::fs::remove_dir_all(root);
    }
}
