// Wed Oct 14 2026 - Alex

use crate::ir::{ElfFunctionIR, ElfObjectIR, ElfSymbolBinding};
use crate::pattern::{is_glob_pattern, GlobPatternSet};
use crate::symbol::ExportedSymbolSet;
use crate::version_script::tags::is_known_arch;
use crate::version_script::{parse_api_level, ApiLevel, ParsedTags, VersionScriptError, FUTURE_API_LEVEL};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

static EXTERN_CPP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^extern\s*"[Cc]\+\+"\s*\{$"#).expect("valid extern C++ regex"));

/// Receives every `(line_no, message)` the parser reports.
pub trait ErrorHandler {
    fn on_error(&mut self, line_no: usize, message: &str);
}

impl<F> ErrorHandler for F
where
    F: FnMut(usize, &str),
{
    fn on_error(&mut self, line_no: usize, message: &str) {
        self(line_no, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineScope {
    Global,
    Local,
}

/// Reads an ELF version script and collects the symbols it exports for one
/// architecture at one API level.
///
/// ```text
/// LIBFOO_1.0 {
///   global:
///     foo;            # introduced=21
///     foo_data;       # var
///     extern "C++" {
///       Foo::*;
///     };
///   local:
///     *;
/// };
/// ```
pub struct VersionScriptParser<R: BufRead> {
    reader: R,
    arch: String,
    introduced_arch_tag: String,
    api_level: ApiLevel,
    excluded_symbol_versions: BTreeSet<String>,
    excluded_symbol_tags: BTreeSet<String>,
    error_handler: Option<Box<dyn ErrorHandler>>,
    line_no: usize,
    deferred_error: Option<VersionScriptError>,

    functions: BTreeMap<String, ElfFunctionIR>,
    vars: BTreeMap<String, ElfObjectIR>,
    glob_patterns: GlobPatternSet,
    demangled_cpp_symbols: GlobPatternSet,
    demangled_cpp_glob_patterns: GlobPatternSet,
    function_regexes: BTreeSet<String>,
    glob_var_regexes: BTreeSet<String>,
}

impl<R: BufRead> VersionScriptParser<R> {
    pub fn new(reader: R, arch: &str, api_level: ApiLevel) -> Self {
        Self {
            reader,
            arch: arch.to_string(),
            introduced_arch_tag: format!("introduced-{}=", arch),
            api_level,
            excluded_symbol_versions: BTreeSet::new(),
            excluded_symbol_tags: BTreeSet::new(),
            error_handler: None,
            line_no: 0,
            deferred_error: None,
            functions: BTreeMap::new(),
            vars: BTreeMap::new(),
            glob_patterns: GlobPatternSet::new(),
            demangled_cpp_symbols: GlobPatternSet::new(),
            demangled_cpp_glob_patterns: GlobPatternSet::new(),
            function_regexes: BTreeSet::new(),
            glob_var_regexes: BTreeSet::new(),
        }
    }

    pub fn with_excluded_symbol_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_symbol_versions = versions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_symbol_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_symbol_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_error_handler(mut self, handler: Box<dyn ErrorHandler>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    /// Parses every version block in the input.
    ///
    /// Grammar errors stop parsing at once. A malformed `introduced` tag only
    /// skips that tag; the first one is returned after the input is consumed.
    /// Symbols collected before an error stay in the result maps.
    pub fn parse(&mut self) -> Result<(), VersionScriptError> {
        while let Some(line) = self.read_line()? {
            let lparen_pos = match line.find('{') {
                Some(pos) => pos,
                None => {
                    return Err(self.report_error(format!("No version opening parenthesis: {}", line)));
                }
            };

            let version = line[..lparen_pos].trim();
            let ignore_symbols = self.excluded_symbol_versions.contains(version);
            log::debug!(
                "Version block {} at line {}{}",
                version,
                self.line_no,
                if ignore_symbols { " (excluded)" } else { "" }
            );

            self.parse_version_block(ignore_symbols)?;
        }

        match self.deferred_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn parse_version_block(&mut self, ignore_symbols: bool) -> Result<(), VersionScriptError> {
        let mut scope = LineScope::Global;
        let mut is_in_extern_cpp = false;

        while let Some(line) = self.read_line()? {
            if line.contains('}') {
                if is_in_extern_cpp {
                    is_in_extern_cpp = false;
                    continue;
                }
                return Ok(());
            }

            if EXTERN_CPP_PATTERN.is_match(&line) {
                is_in_extern_cpp = true;
                continue;
            }

            if line.starts_with("local:") {
                scope = LineScope::Local;
                continue;
            }
            if line.starts_with("global:") {
                scope = LineScope::Global;
                continue;
            }
            if scope != LineScope::Global {
                continue;
            }

            if !ignore_symbols {
                self.parse_symbol_line(&line, is_in_extern_cpp)?;
            }
        }

        Err(self.report_error("No matching closing parenthesis".to_string()))
    }

    fn parse_symbol_line(&mut self, line: &str, is_in_extern_cpp: bool) -> Result<(), VersionScriptError> {
        let pos = match line.find(';') {
            Some(pos) => pos,
            None => {
                return Err(self.report_error(format!("No semicolon at the end of the symbol line: {}", line)));
            }
        };

        let symbol = line[..pos].trim();
        let tags = self.parse_symbol_tags(line);
        if !self.is_symbol_exported(&tags) {
            log::trace!("Skipping {} at line {}", symbol, self.line_no);
            return Ok(());
        }

        if is_in_extern_cpp {
            if is_glob_pattern(symbol) {
                self.demangled_cpp_glob_patterns.insert(symbol.to_string());
            } else {
                self.demangled_cpp_symbols.insert(symbol.to_string());
            }
            return Ok(());
        }

        if is_glob_pattern(symbol) {
            self.glob_patterns.insert(symbol.to_string());
            return Ok(());
        }

        if tags.has_var_tag {
            self.add_var(symbol);
        } else {
            self.add_function(symbol);
        }
        Ok(())
    }

    /// Tags are read left to right. The first `introduced-<arch>=` tag for
    /// the configured arch fixes the threshold; any later generic or
    /// arch-specific introduced tag is ignored.
    pub fn parse_symbol_tags(&mut self, line: &str) -> ParsedTags {
        let mut result = ParsedTags::default();

        let comment = match line.find('#') {
            Some(pos) => &line[pos + 1..],
            None => return result,
        };

        let introduced_arch_tag = self.introduced_arch_tag.clone();
        let mut has_introduced_arch_tags = false;

        for tag in comment.split([' ', '\t']).filter(|t| !t.is_empty()) {
            if self.excluded_symbol_tags.contains(tag) {
                result.has_excluded_tags = true;
            }

            if tag == "var" {
                result.has_var_tag = true;
                continue;
            }

            if tag == self.arch {
                result.has_arch_tags = true;
                result.has_current_arch_tag = true;
                continue;
            }

            if is_known_arch(tag) {
                result.has_arch_tags = true;
            }

            if let Some(level) = tag.strip_prefix("introduced=") {
                match parse_api_level(level) {
                    Some(level) if !has_introduced_arch_tags => {
                        result.has_introduced_tags = true;
                        result.introduced = level;
                    }
                    Some(_) => {}
                    None => self.report_bad_tag(tag),
                }
                continue;
            }

            if let Some(level) = tag.strip_prefix(introduced_arch_tag.as_str()) {
                match parse_api_level(level) {
                    Some(level) if !has_introduced_arch_tags => {
                        has_introduced_arch_tags = true;
                        result.has_introduced_tags = true;
                        result.introduced = level;
                    }
                    Some(_) => {}
                    None => self.report_bad_tag(tag),
                }
                continue;
            }

            if tag == "future" {
                result.has_future_tag = true;
            }
        }

        result
    }

    pub fn is_symbol_exported(&self, tags: &ParsedTags) -> bool {
        if tags.has_excluded_tags {
            return false;
        }

        if tags.has_arch_tags && !tags.has_current_arch_tag {
            return false;
        }

        if tags.has_future_tag {
            return self.api_level == FUTURE_API_LEVEL;
        }

        if tags.has_introduced_tags {
            return self.api_level >= tags.introduced;
        }

        true
    }

    fn add_function(&mut self, symbol: &str) {
        self.functions
            .entry(symbol.to_string())
            .or_insert_with(|| ElfFunctionIR::new(symbol, ElfSymbolBinding::Global));
    }

    fn add_var(&mut self, symbol: &str) {
        self.vars
            .entry(symbol.to_string())
            .or_insert_with(|| ElfObjectIR::new(symbol, ElfSymbolBinding::Global));
    }

    fn read_line(&mut self) -> Result<Option<String>, VersionScriptError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok(Some(line.to_string()));
        }
    }

    fn report_error(&mut self, message: String) -> VersionScriptError {
        log::debug!("Version script error at line {}: {}", self.line_no, message);
        if let Some(handler) = self.error_handler.as_mut() {
            handler.on_error(self.line_no, &message);
        }
        VersionScriptError::Syntax {
            line: self.line_no,
            message,
        }
    }

    fn report_bad_tag(&mut self, tag: &str) {
        let error = self.report_error(format!("Bad introduced tag: {}", tag));
        if self.deferred_error.is_none() {
            self.deferred_error = Some(error);
        }
    }

    pub fn functions(&self) -> &BTreeMap<String, ElfFunctionIR> {
        &self.functions
    }

    pub fn glob_vars(&self) -> &BTreeMap<String, ElfObjectIR> {
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

    /// Never populated; regex symbol patterns are not part of the grammar.
    pub fn function_regexes(&self) -> &BTreeSet<String> {
        &self.function_regexes
    }

    /// Never populated; regex symbol patterns are not part of the grammar.
    pub fn glob_var_regexes(&self) -> &BTreeSet<String> {
        &self.glob_var_regexes
    }

    pub fn into_exported_symbol_set(self) -> ExportedSymbolSet {
        let mut exports = ExportedSymbolSet::new();
        for function in self.functions.values() {
            exports.add_function(&function.name, function.binding);
        }
        for var in self.vars.values() {
            exports.add_var(&var.name, var.binding);
        }
        for pattern in &self.glob_patterns {
            exports.add_glob_pattern(pattern);
        }
        for symbol in &self.demangled_cpp_symbols {
            exports.add_demangled_cpp_symbol(symbol);
        }
        for pattern in &self.demangled_cpp_glob_patterns {
            exports.add_demangled_cpp_glob_pattern(pattern);
        }
        exports
    }
}
