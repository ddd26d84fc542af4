//! Profile and rule record types.

use serde::{Deserialize, Serialize};

use crate::routing::MatchRule;

/// Fixed set of link icon categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    /// Code hosting. Links in this category drive the star/highlight URL.
    Github,
    Substack,
    Link,
    Star,
}

impl IconKey {
    /// The category whose first link becomes the star/highlight URL.
    pub const CODE_HOSTING: IconKey = IconKey::Github;
}

/// A single link shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub url: String,
    pub icon: IconKey,
}

/// Render settings carried by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    /// Call-to-action text.
    pub cta: String,
    /// Accent color (CSS color string).
    pub color: String,
    /// Whether the highlight/star button is shown.
    pub show_star: bool,
    /// Ordered links.
    pub links: Vec<LinkConfig>,
}

/// Named bundle of widget render settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub config: ProfileConfig,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// Binding of a domain + path pattern to a profile.
///
/// `profile_id` is a weak reference: the profile may have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub profile_id: String,
    pub domain: String,
    pub path_pattern: String,
    /// Always `calculate_specificity(path_pattern)` for rules written through the API.
    pub priority: u32,
    pub enabled: bool,
}

impl MatchRule for Rule {
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
