// Wed Oct 14 2026 - Alex

use crate::ir::{ElfFunctionIR, ElfObjectIR, ElfSymbolBinding};
use crate::pattern::{has_matching_glob_pattern, GlobCache, GlobPatternSet};
use crate::symbol::{is_cpp_symbol, Demangler, ItaniumDemangler};
use serde::Serialize;
use std::collections::BTreeMap;

/// The set of symbols a library exports, as declared by a version script or
/// read from a shared object.
///
/// Exact names live in `funcs` and `vars`. Everything else is matched
/// lazily: raw glob patterns against the linker name, and for `_Z` names the
/// demangled spelling against the C++ exact and glob sets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportedSymbolSet {
    funcs: BTreeMap<String, ElfFunctionIR>,
    vars: BTreeMap<String, ElfObjectIR>,
    glob_patterns: GlobPatternSet,
    demangled_cpp_symbols: GlobPatternSet,
    demangled_cpp_glob_patterns: GlobPatternSet,
    #[serde(skip)]
    glob_cache: GlobCache,
}

impl ExportedSymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, name: &str, binding: ElfSymbolBinding) {
        self.funcs.insert(name.to_string(), ElfFunctionIR::new(name, binding));
    }

    pub fn add_var(&mut self, name: &str, binding: ElfSymbolBinding) {
        self.vars.insert(name.to_string(), ElfObjectIR::new(name, binding));
    }

    pub fn add_glob_pattern(&mut self, pattern: &str) {
        self.glob_patterns.insert(pattern.to_string());
    }

    pub fn add_demangled_cpp_symbol(&mut self, name: &str) {
        self.demangled_cpp_symbols.insert(name.to_string());
    }

    pub fn add_demangled_cpp_glob_pattern(&mut self, pattern: &str) {
        self.demangled_cpp_glob_patterns.insert(pattern.to_string());
    }

    pub fn functions(&self) -> &BTreeMap<String, ElfFunctionIR> {
        &self.funcs
    }

    pub fn vars(&self) -> &BTreeMap<String, ElfObjectIR> {
        &self.vars
    }

    pub fn glob_patterns(&self) -> &GlobPatternSet {
        &self.glob_patterns
    }

    pub fn demangled_cpp_symbols(&self) -> &GlobPatternSet {
        &self.demangled_cpp_symbols
    }

    pub fn demangled_cpp_glob_patterns(&self) -> &GlobPatternSet {
        &self.demangled_cpp_glob_patterns
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
            + self.vars.len()
            + self.glob_patterns.len()
            + self.demangled_cpp_symbols.len()
            + self.demangled_cpp_glob_patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.has_symbol_with(name, &ItaniumDemangler)
    }

    pub fn has_symbol_with(&self, name: &str, demangler: &dyn Demangler) -> bool {
        if self.funcs.contains_key(name) || self.vars.contains_key(name) {
            return true;
        }

        if has_matching_glob_pattern(&self.glob_cache, &self.glob_patterns, name) {
            return true;
        }

        if !is_cpp_symbol(name) {
            return false;
        }

        let demangled = match demangler.demangle(name) {
            Some(demangled) => demangled,
            None => return false,
        };

        self.demangled_cpp_symbols.contains(&demangled)
            || has_matching_glob_pattern(&self.glob_cache, &self.demangled_cpp_glob_patterns, &demangled)
    }

    /// Adds every entry of `other`. On a name present in both, `other`'s
    /// binding wins.
    pub fn merge(&mut self, other: ExportedSymbolSet) {
        self.funcs.extend(other.funcs);
        self.vars.extend(other.vars);
        self.glob_patterns.extend(other.glob_patterns);
        self.demangled_cpp_symbols.extend(other.demangled_cpp_symbols);
        self.demangled_cpp_glob_patterns.extend(other.demangled_cpp_glob_patterns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_names_are_exported() {
        let mut set = ExportedSymbolSet::new();
        set.add_function("foo", ElfSymbolBinding::Global);
        set.add_var("bar", ElfSymbolBinding::Weak);

        assert!(set.has_symbol("foo"));
        assert!(set.has_symbol("bar"));
        assert!(!set.has_symbol("baz"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let mut set = ExportedSymbolSet::new();
        set.add_function("foo", ElfSymbolBinding::Global);
        set.add_function("foo", ElfSymbolBinding::Weak);

        assert_eq!(set.functions().len(), 1);
        assert_eq!(set.functions()["foo"].binding, ElfSymbolBinding::Weak);
    }

    #[test]
    fn test_raw_glob() {
        let mut set = ExportedSymbolSet::new();
        set.add_glob_pattern("foo*");

        assert!(set.has_symbol("foo"));
        assert!(set.has_symbol("foobar"));
        assert!(!set.has_symbol("barfoo"));
    }

    #[test]
    fn test_demangled_exact_and_glob() {
        let mut set = ExportedSymbolSet::new();
        set.add_demangled_cpp_symbol("Test2::test()");
        set.add_demangled_cpp_glob_pattern("Test4::*");

        assert!(set.has_symbol("_ZN5Test24testEv"));
        assert!(set.has_symbol("_ZN5Test44testEv"));
        assert!(set.has_symbol("_ZN5Test45test1Ei"));
        assert!(!set.has_symbol("_ZN5Test34testEv"));
    }

    #[test]
    fn test_demangled_sets_ignore_c_names() {
        let mut set = ExportedSymbolSet::new();
        set.add_demangled_cpp_symbol("test");
        set.add_demangled_cpp_glob_pattern("*");

        assert!(!set.has_symbol("test"));
        assert!(set.has_symbol("_ZN5Test24testEv"));
    }

    #[test]
    fn test_demangle_failure_is_not_exported() {
        let mut set = ExportedSymbolSet::new();
        set.add_demangled_cpp_glob_pattern("*");

        let failing = |_: &str| -> Option<String> { None };
        assert!(!set.has_symbol_with("_ZN5Test24testEv", &failing));
    }

    #[test]
    fn test_substituted_demangler() {
        let mut set = ExportedSymbolSet::new();
        set.add_demangled_cpp_symbol("answer");

        let fixed = |_: &str| Some("answer".to_string());
        assert!(set.has_symbol_with("_Zwhatever", &fixed));
        assert!(!set.has_symbol_with("whatever", &fixed));
    }

    #[test]
    fn test_merge() {
        let mut a = ExportedSymbolSet::new();
        a.add_function("foo", ElfSymbolBinding::Global);
        let mut b = ExportedSymbolSet::new();
        b.add_function("foo", ElfSymbolBinding::Weak);
        b.add_glob_pattern("bar*");

        a.merge(b);
        assert_eq!(a.functions()["foo"].binding, ElfSymbolBinding::Weak);
        assert!(a.has_symbol("barbaz"));
    }

    #[test]
    fn test_every_exact_entry_is_a_member() {
        let mut set = ExportedSymbolSet::new();
        for name in ["a", "b", "_ZN1a1bEv"] {
            set.add_function(name, ElfSymbolBinding::Global);
        }
        set.add_var("v", ElfSymbolBinding::Global);

        for name in set.functions().keys().chain(set.vars().keys()) {
            assert!(set.has_symbol(name));
        }
    }
}
