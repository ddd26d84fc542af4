//! Icon assets for link categories.

use serde::Serialize;

use crate::profiles::IconKey;

/// A rendered icon asset (inline SVG markup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Icon(&'static str);

impl Icon {
    /// SVG markup for the icon.
    pub fn svg(&self) -> &'static str {
        self.0
    }
}

const GITHUB_SVG: &str = r#"<svg viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path fill="currentColor" d="M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38v-1.33c-2.23.48-2.7-1.07-2.7-1.07-.36-.92-.89-1.17-.89-1.17-.73-.5.06-.49.06-.49.8.06 1.23.83 1.23.83.71 1.22 1.87.87 2.33.66.07-.52.28-.87.5-1.07-1.78-.2-3.64-.89-3.64-3.95 0-.87.31-1.59.82-2.15-.08-.2-.36-1.02.08-2.12 0 0 .67-.21 2.2.82a7.6 7.6 0 0 1 4 0c1.53-1.04 2.2-.82 2.2-.82.44 1.1.16 1.92.08 2.12.51.56.82 1.27.82 2.15 0 3.07-1.87 3.75-3.65 3.95.29.25.54.73.54 1.48v2.2c0 .21.15.46.55.38A8.01 8.01 0 0 0 16 8c0-4.42-3.58-8-8-8z"/></svg>"#;

const SUBSTACK_SVG: &str = r#"<svg viewBox="0 0 24 24" width="16" height="16" aria-hidden="true"><path fill="currentColor" d="M22.54 8.25H1.46V5.41h21.08v2.84zM1.46 10.8V24L12 18.1 22.54 24V10.8H1.46zM22.54 0H1.46v2.84h21.08V0z"/></svg>"#;

const LINK_SVG: &str = r#"<svg viewBox="0 0 24 24" width="16" height="16" aria-hidden="true"><path fill="none" stroke="currentColor" stroke-width="2" d="M10 13a5 5 0 0 0 7.07 0l3-3a5 5 0 0 0-7.07-7.07l-1.5 1.5M14 11a5 5 0 0 0-7.07 0l-3 3a5 5 0 0 0 7.07 7.07l1.5-1.5"/></svg>"#;

const STAR_SVG: &str = r#"<svg viewBox="0 0 24 24" width="16" height="16" aria-hidden="true"><path fill="currentColor" d="M12 2l3.09 6.26L22 9.27l-5 4.87L18.18 21 12 17.77 5.82 21 7 14.14l-5-4.87 6.91-1.01L12 2z"/></svg>"#;

/// Map a link category to its icon asset.
pub fn icon_for(key: IconKey) -> Icon {
    match key {
        IconKey::Github => Icon(GITHUB_SVG),
        IconKey::Substack => Icon(SUBSTACK_SVG),
        IconKey::Link => Icon(LINK_SVG),
        IconKey::Star => Icon(STAR_SVG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category_has_distinct_svg() {
        let keys = [IconKey::Github, IconKey::Substack, IconKey::Link, IconKey::Star];
        for (i, a) in keys.iter().enumerate() {
            assert!(icon_for(*a).svg().starts_with("<svg"));
            for b in &keys[i + 1..] {
                assert_ne!(icon_for(*a), icon_for(*b));
            }
        }
    }
}
