// Wed Oct 14 2026 - Alex

use std::collections::HashSet;

/// Linker set keys that have already been emitted into a dump.
#[derive(Debug, Clone, Default)]
pub struct TypeCache {
    keys: HashSet<String>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns true if `key` was not cached before.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
