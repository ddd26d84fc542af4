//! Denormalized rule snapshot ("widget manifest").
//!
//! # Data Flow
//! ```text
//! Build (widget-cli build-snapshot):
//!     all Profiles + all Rules
//!     → keep enabled rules whose profile exists
//!     → inline profile config into each rule
//!     → write {"rules": [...]} to disk
//!
//! Consume (loader snapshot fallback):
//!     fetch artifact → routing::find_best_match over SnapshotRule
//! ```
//!
//! # Design Decisions
//! - Immutable once built; staleness is not detected. Rebuild after any
//!   rule or profile change.
//! - Rule input order is preserved so tie-breaking matches the live path

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profiles::{Profile, ProfileConfig, Rule};
use crate::routing::MatchRule;

/// Errors reading or writing the snapshot artifact.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rule with its profile's render configuration inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRule {
    pub domain: String,
    pub path_pattern: String,
    pub priority: u32,
    pub enabled: bool,
    pub config: ProfileConfig,
}

impl MatchRule for SnapshotRule {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// The snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rules: Vec<SnapshotRule>,
}

/// Join enabled rules to their profiles, dropping rules whose profile is gone.
pub fn build(profiles: &[Profile], rules: &[Rule]) -> Snapshot {
    let by_id: HashMap<&str, &Profile> = profiles.iter().map(|p| (p.id.as_str(), p)).collect();

    let rules = rules
        .iter()
        .filter(|rule| rule.enabled)
        .filter_map(|rule| match by_id.get(rule.profile_id.as_str()) {
            Some(profile) => Some(SnapshotRule {
                domain: rule.domain.clone(),
                path_pattern: rule.path_pattern.clone(),
                priority: rule.priority,
                enabled: rule.enabled,
                config: profile.config.clone(),
            }),
            None => {
                tracing::debug!(
                    rule_id = %rule.id,
                    profile_id = %rule.profile_id,
                    "Dropping rule with missing profile"
                );
                None
            }
        })
        .collect();

    Snapshot { rules }
}

/// Write the snapshot as pretty JSON, creating parent directories.
pub fn write(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}

/// Read a snapshot from disk.
pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
