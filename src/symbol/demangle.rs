// Wed Oct 14 2026 - Alex

use cpp_demangle::{DemangleOptions, Symbol};

/// Turns a mangled linker name into its source-level spelling.
pub trait Demangler: Send + Sync {
    fn demangle(&self, name: &str) -> Option<String>;
}

/// Itanium C++ ABI demangler. Stateless, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItaniumDemangler;

impl Demangler for ItaniumDemangler {
    fn demangle(&self, name: &str) -> Option<String> {
        let symbol = Symbol::new(name).ok()?;
        match symbol.demangle(&DemangleOptions::default()) {
            Ok(demangled) => Some(demangled),
            Err(_) => {
                log::debug!("Failed to demangle {}", name);
                None
            }
        }
    }
}

impl<F> Demangler for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn demangle(&self, name: &str) -> Option<String> {
        self(name)
    }
}

pub fn is_cpp_symbol(name: &str) -> bool {
    name.starts_with("_Z")
}

pub fn demangle_cpp(name: &str) -> Option<String> {
    ItaniumDemangler.demangle(name)
}

pub fn try_demangle(name: &str) -> String {
    demangle_cpp(name).unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demangle_member_function() {
        assert_eq!(demangle_cpp("_ZN5Test24testEv").as_deref(), Some("Test2::test()"));
        assert_eq!(demangle_cpp("_ZN5Test45test1Ei").as_deref(), Some("Test4::test1(int)"));
    }

    #[test]
    fn test_demangle_free_function() {
        assert_eq!(demangle_cpp("_Z3fooic").as_deref(), Some("foo(int, char)"));
    }

    #[test]
    fn test_demangle_failure() {
        assert_eq!(demangle_cpp("printf"), None);
        assert_eq!(demangle_cpp("_Z"), None);
        assert_eq!(try_demangle("printf"), "printf");
    }

    #[test]
    fn test_is_cpp_symbol() {
        assert!(is_cpp_symbol("_ZN3foo3barEv"));
        assert!(!is_cpp_symbol("foo"));
        assert!(!is_cpp_symbol("__cxa_atexit"));
    }

    #[test]
    fn test_closure_demangler() {
        let upper = |name: &str| Some(name.to_uppercase());
        assert_eq!(upper.demangle("abc").as_deref(), Some("ABC"));
    }
}
