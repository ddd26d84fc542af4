//! Rule selection for a (domain, pathname) request.
//!
//! # Responsibilities
//! - Filter rules to enabled ones for the exact domain whose pattern matches
//! - Pick the highest-priority survivor
//! - Return an explicit `None` rather than a default rule
//!
//! # Design Decisions
//! - Linear scan; rule lists are small and human-curated
//! - Ties keep the first rule in input order. Callers that need deterministic
//!   results must supply rules in a stable order.

use crate::routing::matcher::match_path;

/// The fields the resolver needs from a rule.
///
/// Implemented by live rules and by flattened snapshot records so both
/// contexts share one selection algorithm.
pub trait MatchRule {
    /// Host the rule applies to (exact, case-sensitive).
    fn domain(&self) -> &str;
    /// Path pattern, see [`crate::routing::matcher`].
    fn path_pattern(&self) -> &str;
    /// Higher wins among matching rules.
    fn priority(&self) -> u32;
    /// Disabled rules never match.
    fn enabled(&self) -> bool;
}

impl<T: MatchRule + ?Sized> MatchRule for &T {
    fn domain(&self) -> &str {
        (**self).domain()
    }
    fn path_pattern(&self) -> &str {
        (**self).path_pattern()
    }
    fn priority(&self) -> u32 {
        (**self).priority()
    }
    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

/// Check whether a single rule applies to the request.
pub fn rule_matches<R: MatchRule>(rule: &R, domain: &str, pathname: &str) -> bool {
    rule.enabled() && rule.domain() == domain && match_path(pathname, rule.path_pattern())
}

/// Find the best matching rule for `domain` and `pathname`.
pub fn find_best_match<'a, R: MatchRule>(
    domain: &str,
    pathname: &str,
    rules: &'a [R],
) -> Option<&'a R> {
    rules
        .iter()
        .filter(|rule| rule_matches(*rule, domain, pathname))
        .fold(None::<&'a R>, |best, candidate| match best {
            Some(current) if current.priority() >= candidate.priority() => Some(current),
            _ => Some(candidate),
        })
}
