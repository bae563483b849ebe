// Tue Oct 13 2026 - Alex

use crate::pattern::CompiledGlob;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Memoises compiled glob patterns, keyed by the pattern text.
pub struct GlobCache {
    cache: RwLock<HashMap<String, CompiledGlob>>,
}

impl GlobCache {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn matches(&self, pattern: &str, name: &str) -> bool {
        if let Some(compiled) = self.cache.read().get(pattern) {
            return compiled.matches(name);
        }

        let compiled = CompiledGlob::compile_or_literal(pattern);
        let result = compiled.matches(name);
        self.cache.write().insert(pattern.to_string(), compiled);
        result
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn size(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for GlobCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GlobCache {
    fn clone(&self) -> Self {
        Self {
            cache: RwLock::new(self.cache.read().clone()),
        }
    }
}

impl std::fmt::Debug for GlobCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobCache").field("size", &self.size()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_memoises_patterns() {
        let cache = GlobCache::new();
        assert!(cache.matches("foo*", "foobar"));
        assert!(!cache.matches("foo*", "barfoo"));
        assert_eq!(cache.size(), 1);

        assert!(cache.matches("ba?", "bar"));
        assert_eq!(cache.size(), 2);

        cache.clear();
        assert_eq!(cache.size(), 0);
    }
}
