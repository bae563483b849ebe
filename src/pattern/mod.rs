// Tue Oct 13 2026 - Alex

pub mod wildcard;
pub mod cache;
pub mod error;

pub use wildcard::{fnmatch, is_glob_pattern, CompiledGlob};
pub use cache::GlobCache;
pub use error::PatternError;

use std::collections::BTreeSet;

pub type GlobPatternSet = BTreeSet<String>;

/// Returns true if any pattern in `patterns` matches `name` with fnmatch
/// semantics. Compiled patterns are memoised in `cache`.
pub fn has_matching_glob_pattern(cache: &GlobCache, patterns: &GlobPatternSet, name: &str) -> bool {
    patterns.iter().any(|pattern| cache.matches(pattern, name))
}
