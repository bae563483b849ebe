// Tue Oct 13 2026 - Alex

use crate::pattern::PatternError;
use ::glob::{MatchOptions, Pattern};

/// fnmatch(3) with no flags: `*` crosses `/`, leading dots are ordinary.
const FNMATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub enum CompiledGlob {
    Pattern(Pattern),
    Literal(String),
}

impl CompiledGlob {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let normalized = normalize(pattern);
        Pattern::new(&normalized)
            .map(Self::Pattern)
            .map_err(|e| PatternError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            })
    }

    /// Compiles `pattern`, degrading to an exact string comparison when the
    /// glob crate still rejects it after normalization.
    pub fn compile_or_literal(pattern: &str) -> Self {
        match Self::compile(pattern) {
            Ok(compiled) => compiled,
            Err(e) => {
                log::warn!("{}; matching it literally", e);
                Self::Literal(pattern.to_string())
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Pattern(p) => p.matches_with(name, FNMATCH_OPTIONS),
            Self::Literal(s) => s == name,
        }
    }
}

pub fn is_glob_pattern(s: &str) -> bool {
    s.contains(|c| matches!(c, '*' | '?' | '['))
}

pub fn fnmatch(pattern: &str, name: &str) -> bool {
    CompiledGlob::compile_or_literal(pattern).matches(name)
}

// Rewrites fnmatch syntax into what the glob crate accepts:
//  - runs of `*` collapse to one, since `**` means recursive components there
//  - `\x` becomes a literal `x`
//  - `[^...]` is spelled `[!...]`
//  - a `[` with no closing `]` is an ordinary character
fn normalize(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut prev_star = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if c == '*' {
            if !prev_star {
                out.push('*');
            }
            prev_star = true;
            continue;
        }
        prev_star = false;

        match c {
            '\\' if i < chars.len() => {
                out.push_str(&Pattern::escape(&chars[i].to_string()));
                i += 1;
            }
            '[' => match bracket_end(&chars, i) {
                Some(end) => {
                    out.push('[');
                    let mut j = i;
                    if chars[j] == '^' {
                        out.push('!');
                        j += 1;
                    }
                    out.extend(&chars[j..=end]);
                    i = end + 1;
                }
                None => out.push_str("[[]"),
            },
            _ => out.push(c),
        }
    }

    out
}

// Index of the `]` closing a bracket expression whose body starts at
// `start`. A `]` right after the opening (or after `!`/`^`) is a member.
fn bracket_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    if matches!(chars.get(i), Some('!') | Some('^')) {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars[i.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| i + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_and_question() {
        assert!(fnmatch("test1*", "test1Foo"));
        assert!(fnmatch("test1*", "test1"));
        assert!(!fnmatch("test2*", "test1Foo"));
        assert!(fnmatch("test3?", "test3a"));
        assert!(!fnmatch("test3?", "test3"));
        assert!(!fnmatch("test3?", "test3ab"));
    }

    #[test]
    fn test_bracket_sets() {
        assert!(fnmatch("test2[Aa]", "test2A"));
        assert!(fnmatch("test2[Aa]", "test2a"));
        assert!(!fnmatch("test2[Aa]", "test2b"));
        assert!(fnmatch("test2[!Aa]", "test2b"));
        assert!(fnmatch("test2[^Aa]", "test2b"));
        assert!(!fnmatch("test2[^Aa]", "test2a"));
    }

    #[test]
    fn test_star_crosses_separators_and_dots() {
        assert!(fnmatch("*", "a/b/c"));
        assert!(fnmatch("Test4::*", "Test4::method(int)"));
        assert!(fnmatch("*", ".hidden"));
    }

    #[test]
    fn test_double_star_is_plain_star() {
        assert!(fnmatch("foo**bar", "foo_x_bar"));
        assert!(fnmatch("**", "anything"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        assert!(fnmatch("foo[", "foo["));
        assert!(!fnmatch("foo[", "foo"));
        assert!(fnmatch("foo[*", "foo[bar"));
        assert!(fnmatch("foo[*", "foo["));
        assert!(!fnmatch("foo[*", "foobar"));
    }

    #[test]
    fn test_backslash_escapes() {
        assert!(fnmatch("foo\\*", "foo*"));
        assert!(!fnmatch("foo\\*", "foobar"));
        assert!(fnmatch("a\\?c", "a?c"));
        assert!(!fnmatch("a\\?c", "abc"));
        assert!(fnmatch("a\\[b]", "a[b]"));
        assert!(fnmatch("\\x", "x"));
    }

    #[test]
    fn test_leading_bracket_member() {
        assert!(fnmatch("a[]]", "a]"));
        assert!(fnmatch("a[!]]", "ab"));
        assert!(!fnmatch("a[!]]", "a]"));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("test1*"));
        assert!(is_glob_pattern("test2[Aa]"));
        assert!(is_glob_pattern("test3?"));
        assert!(!is_glob_pattern("test4"));
        assert!(!is_glob_pattern("Test2::test()"));
    }
}
