// Wed Oct 14 2026 - Alex

pub mod error;
pub mod headers;

pub use error::LinkerError;
pub use headers::collect_exported_headers;

use crate::config::{Config, ConfigError};
use crate::ir::{
    create_ir_dumper, create_ir_reader, AbiDump, ElfSymbolIR, IrBuilder, IrError, TextFormat, TypeIR,
};
use crate::symbol::{ElfExportReader, ExportedSymbolSet};
use crate::utils::logging::ScopedTimer;
use crate::version_script::VersionScriptParser;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub types: usize,
    pub functions: usize,
    pub global_vars: usize,
    pub dropped_types: usize,
    pub dropped_functions: usize,
    pub dropped_global_vars: usize,
}

/// Merges per-translation-unit dumps into one library dump, keeping only the
/// functions and variables the library exports.
pub struct Linker {
    exports: ExportedSymbolSet,
    exported_headers: BTreeSet<String>,
    no_filter: bool,
    text_format: TextFormat,
    pretty: bool,
}

impl Linker {
    pub fn new(exports: ExportedSymbolSet) -> Self {
        Self {
            exports,
            exported_headers: BTreeSet::new(),
            no_filter: false,
            text_format: TextFormat::Json,
            pretty: true,
        }
    }

    pub fn with_no_filter(mut self, no_filter: bool) -> Self {
        self.no_filter = no_filter;
        self
    }

    /// Entities whose non-empty `source_file` is not in `headers` are
    /// dropped. An empty set keeps everything.
    pub fn with_exported_headers(mut self, headers: BTreeSet<String>) -> Self {
        self.exported_headers = headers;
        self
    }

    pub fn with_text_format(mut self, format: TextFormat) -> Self {
        self.text_format = format;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, LinkerError> {
        config.validate().map_err(ConfigError::Invalid)?;
        let exports = load_exports(config)?;
        let exported_headers = if config.no_filter {
            BTreeSet::new()
        } else {
            collect_exported_headers(config.exported_header_dirs.as_slice())?
        };
        Ok(Self::new(exports)
            .with_exported_headers(exported_headers)
            .with_no_filter(config.no_filter)
            .with_text_format(config.text_format()?)
            .with_pretty_print(config.pretty))
    }

    pub fn exports(&self) -> &ExportedSymbolSet {
        &self.exports
    }

    pub fn read_dumps(&self, paths: &[PathBuf]) -> Result<Vec<AbiDump>, LinkerError> {
        let _timer = ScopedTimer::new("read_dumps");
        let format = self.text_format;
        paths
            .par_iter()
            .map(|path| {
                let read = || -> Result<AbiDump, IrError> {
                    let mut reader = create_ir_reader(format, path)?;
                    reader.read_dump()?;
                    Ok(reader.into_abi_dump())
                };
                read().map_err(|source| LinkerError::Dump {
                    path: path.display().to_string(),
                    source,
                })
            })
            .collect()
    }

    pub fn link_dumps(&self, dumps: Vec<AbiDump>) -> Result<(AbiDump, LinkStats), LinkerError> {
        let mut dumps = dumps.into_iter();
        let mut merged = dumps.next().ok_or(LinkerError::NoInputs)?;
        for dump in dumps {
            merged.merge(dump);
        }

        let types: IndexMap<String, TypeIR> = std::mem::take(&mut merged.types)
            .into_iter()
            .map(|t| (t.linker_set_key.clone(), t))
            .collect();

        let mut stats = LinkStats::default();
        let mut builder = IrBuilder::new(&types);

        for ty in types.values() {
            if !self.is_in_exported_headers(&ty.source_file) {
                stats.dropped_types += 1;
                continue;
            }
            builder.add_type(ty.clone())?;
        }

        for function in &merged.functions {
            if !self.is_in_exported_headers(&function.source_file) || !self.is_exported(&function.linker_set_key) {
                stats.dropped_functions += 1;
                continue;
            }
            builder.add_function(function.clone())?;
            stats.functions += 1;
        }

        for var in &merged.global_vars {
            if !self.is_in_exported_headers(&var.source_file) || !self.is_exported(&var.linker_set_key) {
                stats.dropped_global_vars += 1;
                continue;
            }
            builder.add_global_var(var.clone())?;
            stats.global_vars += 1;
        }

        for function in self.exports.functions().values() {
            builder.add_elf_symbol(ElfSymbolIR::Function(function.clone()));
        }
        for var in self.exports.vars().values() {
            builder.add_elf_symbol(ElfSymbolIR::Object(var.clone()));
        }

        stats.types = builder.dump().types.len();
        log::info!(
            "Linked {} types, {} functions, {} global variables ({} types, {} functions and {} variables dropped)",
            stats.types,
            stats.functions,
            stats.global_vars,
            stats.dropped_types,
            stats.dropped_functions,
            stats.dropped_global_vars
        );
        Ok((builder.finish(), stats))
    }

    pub fn link(&self, inputs: &[PathBuf], output: &Path) -> Result<LinkStats, LinkerError> {
        if inputs.is_empty() {
            return Err(LinkerError::NoInputs);
        }

        let dumps = self.read_dumps(inputs)?;
        let (linked, stats) = self.link_dumps(dumps)?;

        let mut dumper = create_ir_dumper(self.text_format, output, self.pretty)?;
        dumper.add_abi_dump(&linked)?;
        dumper.dump()?;
        log::info!("Wrote {}", output.display());
        Ok(stats)
    }

    fn is_exported(&self, linker_set_key: &str) -> bool {
        self.no_filter || self.exports.has_symbol(linker_set_key)
    }

    // Builtins carry no source file and always pass.
    fn is_in_exported_headers(&self, source_file: &str) -> bool {
        self.exported_headers.is_empty() || source_file.is_empty() || self.exported_headers.contains(source_file)
    }
}

/// Collects the exported symbols of the shared object in `config`, or of its
/// version script when no shared object is given.
pub fn load_exports(config: &Config) -> Result<ExportedSymbolSet, LinkerError> {
    if let Some(path) = &config.so_file {
        log::info!("Reading exported symbols from {}", path.display());
        return Ok(ElfExportReader::from_file(path)?);
    }

    let path = match &config.version_script {
        Some(path) => path,
        None => return Ok(ExportedSymbolSet::new()),
    };

    let api_level = config
        .api_level()
        .ok_or_else(|| ConfigError::Invalid(format!("Bad api level: {}", config.api)))?;
    log::info!("Parsing version script {} for {} at API {}", path.display(), config.arch, api_level);

    let file = File::open(path)?;
    let mut parser = VersionScriptParser::new(BufReader::new(file), &config.arch, api_level)
        .with_excluded_symbol_versions(config.excluded_symbol_versions.iter().cloned())
        .with_excluded_symbol_tags(config.excluded_symbol_tags.iter().cloned());
    parser.parse()?;
    Ok(parser.into_exported_symbol_set())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        ElfSymbolBinding, FunctionIR, GlobalVarIR, IrDumper, JsonIrDumper, ParamIR, RecordTypeIR,
        TypeIR,
    };
    use std::io::Write;

    fn tu_dump() -> AbiDump {
        let mut dump = AbiDump::new();
        dump.types.push(TypeIR::builtin("int", 4, false, true));
        dump.types.push(TypeIR::record("Foo", RecordTypeIR::new()).with_size(4));
        dump.types.push(TypeIR::pointer("Foo", 8));
        dump.functions.push(FunctionIR::new("foo", "foo", "int"));
        dump.functions.push(FunctionIR::new("hidden", "hidden", "int"));
        dump.functions.push(
            FunctionIR::new("Foo::get", "_ZN3Foo3getEv", "int").with_parameter(ParamIR::this_ptr("Foo *")),
        );
        dump.global_vars.push(GlobalVarIR::new("counter", "counter", "int"));
        dump
    }

    fn exports() -> ExportedSymbolSet {
        let mut exports = ExportedSymbolSet::new();
        exports.add_function("foo", ElfSymbolBinding::Global);
        exports.add_var("counter", ElfSymbolBinding::Global);
        exports.add_demangled_cpp_glob_pattern("Foo::*");
        exports
    }

    #[test]
    fn test_link_filters_by_exports() {
        let linker = Linker::new(exports());
        let (linked, stats) = linker.link_dumps(vec![tu_dump()]).unwrap();

        let keys: Vec<&str> = linked.functions.iter().map(|f| f.linker_set_key.as_str()).collect();
        assert_eq!(keys, vec!["foo", "_ZN3Foo3getEv"]);
        assert_eq!(linked.global_vars.len(), 1);
        assert_eq!(linked.types.len(), 3);
        assert_eq!(stats.dropped_functions, 1);
        assert_eq!(linked.elf_functions.len(), 1);
        assert_eq!(linked.elf_objects.len(), 1);
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let linker = Linker::new(ExportedSymbolSet::new()).with_no_filter(true);
        let (linked, stats) = linker.link_dumps(vec![tu_dump()]).unwrap();
        assert_eq!(linked.functions.len(), 3);
        assert_eq!(stats.dropped_functions, 0);
        assert!(linked.elf_functions.is_empty());
    }

    #[test]
    fn test_duplicate_translation_units_collapse() {
        let linker = Linker::new(exports());
        let (linked, _) = linker.link_dumps(vec![tu_dump(), tu_dump()]).unwrap();
        assert_eq!(linked.types.len(), 3);
        assert_eq!(linked.functions.len(), 2);
    }

    #[test]
    fn test_exported_headers_filter_declarations() {
        let mut dump = tu_dump();
        dump.types.push(TypeIR::record("Private", RecordTypeIR::new()).with_source_file("/src/private.h"));
        dump.types.push(TypeIR::record("Public", RecordTypeIR::new()).with_source_file("/include/foo.h"));
        dump.functions.push(FunctionIR::new("bar", "bar", "Private").with_source_file("/src/private.h"));
        dump.functions.push(FunctionIR::new("baz", "baz", "Private").with_source_file("/include/foo.h"));

        let mut exports = exports();
        exports.add_function("bar", ElfSymbolBinding::Global);
        exports.add_function("baz", ElfSymbolBinding::Global);

        let headers: BTreeSet<String> = ["/include/foo.h".to_string()].into_iter().collect();
        let linker = Linker::new(exports).with_exported_headers(headers);
        let (linked, stats) = linker.link_dumps(vec![dump]).unwrap();

        let keys: Vec<&str> = linked.functions.iter().map(|f| f.linker_set_key.as_str()).collect();
        assert_eq!(keys, vec!["foo", "_ZN3Foo3getEv", "baz"]);
        assert_eq!(stats.dropped_types, 1);
        assert_eq!(stats.dropped_functions, 2);
        assert!(linked.type_by_key("Public").is_some());
        assert!(linked.type_by_key("int").is_some());
        // Still emitted because an exported function refers to it.
        assert!(linked.type_by_key("Private").is_some());
    }

    #[test]
    fn test_no_inputs() {
        let linker = Linker::new(exports());
        assert!(matches!(linker.link_dumps(Vec::new()), Err(LinkerError::NoInputs)));
        assert!(matches!(linker.link(&[], Path::new("out.json")), Err(LinkerError::NoInputs)));
    }

    #[test]
    fn test_link_files() {
        let dir = std::env::temp_dir().join(format!("header_abi_util_link_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let input = dir.join("foo.sdump");
        let mut dumper = JsonIrDumper::new(File::create(&input).unwrap());
        dumper.add_abi_dump(&tu_dump()).unwrap();
        dumper.dump().unwrap();

        let script = dir.join("libfoo.map.txt");
        let mut file = File::create(&script).unwrap();
        writeln!(file, "LIBFOO {{\n  global:\n    foo;\n    counter;  # var\n  local:\n    *;\n}};").unwrap();

        let output = dir.join("libfoo.lsdump");
        let config = Config::new()
            .with_arch("arm64")
            .with_version_script(script)
            .with_dump_files(vec![input.clone()])
            .with_output(output.clone());

        let linker = Linker::from_config(&config).unwrap();
        let stats = linker.link(&config.dump_files, &config.output).unwrap();
        assert_eq!(stats.functions, 1);
        assert_eq!(stats.global_vars, 1);

        let mut reader = create_ir_reader(TextFormat::Json, &output).unwrap();
        reader.read_dump().unwrap();
        assert_eq!(reader.functions().len(), 1);
        assert_eq!(reader.elf_objects()[0].name, "counter");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_dump_names_the_file() {
        let linker = Linker::new(exports());
        let missing = PathBuf::from("/nonexistent/header_abi_util/missing.sdump");
        match linker.read_dumps(&[missing]) {
            Err(LinkerError::Dump { path, .. }) => assert!(path.ends_with("missing.sdump")),
            other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
        }
    }
}
