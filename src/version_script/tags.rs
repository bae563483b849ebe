// Wed Oct 14 2026 - Alex

use crate::version_script::ApiLevel;

/// Architectures a version script may name in a tag comment.
pub const POSSIBLE_ARCHES: &[&str] = &["arm", "arm64", "x86", "x86_64", "mips", "mips64"];

/// Flags collected from the `# ...` comment of one symbol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTags {
    pub has_arch_tags: bool,
    pub has_current_arch_tag: bool,
    pub has_introduced_tags: bool,
    pub has_excluded_tags: bool,
    pub has_future_tag: bool,
    pub has_var_tag: bool,
    /// -1 when no introduced tag applied.
    pub introduced: ApiLevel,
}

impl Default for ParsedTags {
    fn default() -> Self {
        Self {
            has_arch_tags: false,
            has_current_arch_tag: false,
            has_introduced_tags: false,
            has_excluded_tags: false,
            has_future_tag: false,
            has_var_tag: false,
            introduced: -1,
        }
    }
}

pub fn is_known_arch(tag: &str) -> bool {
    POSSIBLE_ARCHES.contains(&tag)
}
