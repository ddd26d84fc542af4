//! Rule matching engine.
//!
//! # Data Flow
//! ```text
//! (domain, pathname) + rules
//!     → resolver.rs (filter enabled + exact domain)
//!     → matcher.rs (evaluate path pattern)
//!     → resolver.rs (highest priority, first wins ties)
//!     → Return: winning rule or None
//!
//! Rule write (CRUD surface):
//!     path pattern → matcher.rs calculate_specificity → persisted priority
//! ```
//!
//! # Design Decisions
//! - Pure functions only: no I/O, no framework types
//! - Used unchanged by the live endpoint and by the loader's snapshot fallback
//! - Deterministic: same input always selects the same rule

pub mod matcher;
pub mod resolver;

pub use matcher::{calculate_specificity, match_path};
pub use resolver::{find_best_match, rule_matches, MatchRule};
