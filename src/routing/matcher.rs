//! Path pattern matching and specificity scoring.
//!
//! # Responsibilities
//! - Decide whether a request path matches a rule's path pattern
//! - Score a pattern so more precise patterns outrank looser ones
//!
//! # Pattern Syntax
//! - Segments are separated by `/`; leading and trailing slashes are ignored
//! - A literal segment must equal the path segment exactly (case-sensitive)
//! - `*` matches exactly one segment
//! - `**` matches zero or more trailing segments; anything after it is ignored
//!
//! # Design Decisions
//! - No regex, no allocation beyond the segment split
//! - The specificity formula is a flat-bonus heuristic. Priorities derived from
//!   it are persisted with each rule, so the formula must stay stable.

/// Bonus applied to patterns containing no `*` character at all.
pub const EXACT_PATH_BONUS: u32 = 1000;
/// Score of a literal segment.
pub const LITERAL_SEGMENT_SCORE: u32 = 100;
/// Score of a `*` segment.
pub const SINGLE_WILDCARD_SCORE: u32 = 10;
/// Score of a `**` segment.
pub const DOUBLE_WILDCARD_SCORE: u32 = 1;
/// Score of the root pattern (`/` or empty).
pub const ROOT_SCORE: u32 = 1;

const SINGLE_WILDCARD: &str = "*";
const DOUBLE_WILDCARD: &str = "**";

fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}

fn segments(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split('/').collect()
    }
}

fn segment_aligns(pattern_segment: &str, path_segment: &str) -> bool {
    pattern_segment == SINGLE_WILDCARD || pattern_segment == path_segment
}

/// Compute the specificity score of a path pattern. Higher is more specific.
///
/// The exact-path bonus looks at the raw pattern, so a `*` embedded inside a
/// literal segment (e.g. `/file*.txt`) still forfeits the bonus even though the
/// segment itself scores as a literal.
pub fn calculate_specificity(pattern: &str) -> u32 {
    let normalized = trim_slashes(pattern);
    if normalized.is_empty() {
        return ROOT_SCORE;
    }

    let mut score = 0;
    if !pattern.contains('*') {
        score += EXACT_PATH_BONUS;
    }

    for segment in normalized.split('/') {
        score += match segment {
            DOUBLE_WILDCARD => DOUBLE_WILDCARD_SCORE,
            SINGLE_WILDCARD => SINGLE_WILDCARD_SCORE,
            _ => LITERAL_SEGMENT_SCORE,
        };
    }

    score
}

/// Check whether `pathname` matches `pattern`.
pub fn match_path(pathname: &str, pattern: &str) -> bool {
    let norm_path = trim_slashes(pathname);
    let norm_pattern = trim_slashes(pattern);

    // Root pattern matches the root path only
    if norm_pattern.is_empty() {
        return norm_path.is_empty();
    }

    let path_segments = segments(norm_path);
    let pattern_segments = segments(norm_pattern);

    if let Some(double_idx) = pattern_segments.iter().position(|s| *s == DOUBLE_WILDCARD) {
        let prefix = &pattern_segments[..double_idx];
        if path_segments.len() < prefix.len() {
            return false;
        }
        return prefix
            .iter()
            .zip(&path_segments)
            .all(|(pat, seg)| segment_aligns(pat, seg));
    }

    if path_segments.len() != pattern_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(&path_segments)
        .all(|(pat, seg)| segment_aligns(pat, seg))
}
