// Wed Oct 14 2026 - Alex

use crate::ir::{
    AbiDump, CompatibilityStatusIR, ElfFunctionIR, ElfObjectIR, ElfSymbolIR, FunctionIR,
    GlobalVarIR, IrError, JsonIrDiffDumper, JsonIrDumper, JsonIrReader, LinkableMessageIR, TypeIR,
};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Json,
}

impl FromStr for TextFormat {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            other => Err(IrError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Receives the entities of one dump and serializes them on `dump`.
pub trait IrDumper {
    fn add_linkable_message(&mut self, message: &LinkableMessageIR) -> Result<(), IrError>;

    fn add_elf_symbol(&mut self, symbol: &ElfSymbolIR) -> Result<(), IrError>;

    fn dump(&mut self) -> Result<(), IrError>;

    fn add_abi_dump(&mut self, dump: &AbiDump) -> Result<(), IrError> {
        for t in &dump.types {
            self.add_linkable_message(&LinkableMessageIR::Type(t.clone()))?;
        }
        for f in &dump.functions {
            self.add_linkable_message(&LinkableMessageIR::Function(f.clone()))?;
        }
        for v in &dump.global_vars {
            self.add_linkable_message(&LinkableMessageIR::GlobalVar(v.clone()))?;
        }
        for f in &dump.elf_functions {
            self.add_elf_symbol(&ElfSymbolIR::Function(f.clone()))?;
        }
        for o in &dump.elf_objects {
            self.add_elf_symbol(&ElfSymbolIR::Object(o.clone()))?;
        }
        Ok(())
    }
}

/// Reads a serialized dump back into ordered entity sequences.
pub trait TextFormatToIrReader {
    fn read_dump(&mut self) -> Result<(), IrError>;

    fn abi_dump(&self) -> &AbiDump;

    fn into_abi_dump(self: Box<Self>) -> AbiDump;

    fn functions(&self) -> &[FunctionIR] {
        &self.abi_dump().functions
    }

    fn global_variables(&self) -> &[GlobalVarIR] {
        &self.abi_dump().global_vars
    }

    fn types(&self) -> &[TypeIR] {
        &self.abi_dump().types
    }

    fn elf_functions(&self) -> &[ElfFunctionIR] {
        &self.abi_dump().elf_functions
    }

    fn elf_objects(&self) -> &[ElfObjectIR] {
        &self.abi_dump().elf_objects
    }

    fn record_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().record_types().collect()
    }

    fn enum_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().enum_types().collect()
    }

    fn pointer_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().pointer_types().collect()
    }

    fn lvalue_reference_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().lvalue_reference_types().collect()
    }

    fn rvalue_reference_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().rvalue_reference_types().collect()
    }

    fn qualified_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().qualified_types().collect()
    }

    fn array_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().array_types().collect()
    }

    fn builtin_types(&self) -> Vec<&TypeIR> {
        self.abi_dump().builtin_types().collect()
    }
}

/// `Added`/`Removed` classify entities present on one side only.
/// `Referenced`/`Unreferenced` classify a changed pair by whether an exported
/// function or variable reaches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    Added,
    Removed,
    #[default]
    Referenced,
    Unreferenced,
}

impl DiffKind {
    pub fn is_lone(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Accumulates the differences found between an old and a new dump.
pub trait IrDiffDumper {
    /// `type_stack` is the breadcrumb of enclosing entities that led to this
    /// pair, see [`unwind_type_stack`]. `kind` must be `Referenced` or
    /// `Unreferenced`.
    fn add_changed_messages(
        &mut self,
        old: &LinkableMessageIR,
        new: &LinkableMessageIR,
        type_stack: &str,
        kind: DiffKind,
    ) -> Result<(), IrError>;

    fn add_linkable_messages(
        &mut self,
        old: &LinkableMessageIR,
        new: &LinkableMessageIR,
        type_stack: &str,
    ) -> Result<(), IrError> {
        self.add_changed_messages(old, new, type_stack, DiffKind::Referenced)
    }

    /// `kind` must be `Added` or `Removed`.
    fn add_linkable_message(&mut self, message: &LinkableMessageIR, kind: DiffKind) -> Result<(), IrError>;

    fn add_lib_name(&mut self, name: &str);

    fn add_arch(&mut self, arch: &str);

    fn add_compatibility_status(&mut self, status: CompatibilityStatusIR);

    fn compatibility_status(&self) -> CompatibilityStatusIR;

    fn dump(&mut self) -> Result<(), IrError>;
}

pub fn unwind_type_stack(type_stack: &VecDeque<String>) -> String {
    type_stack
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("-> ")
}

pub fn create_ir_dumper(format: TextFormat, path: &Path, pretty: bool) -> Result<Box<dyn IrDumper>, IrError> {
    match format {
        TextFormat::Json => {
            let file = File::create(path)?;
            Ok(Box::new(JsonIrDumper::new(BufWriter::new(file)).with_pretty_print(pretty)))
        }
    }
}

pub fn create_ir_reader(format: TextFormat, path: &Path) -> Result<Box<dyn TextFormatToIrReader + Send>, IrError> {
    match format {
        TextFormat::Json => {
            let file = File::open(path)?;
            Ok(Box::new(JsonIrReader::new(BufReader::new(file))))
        }
    }
}

pub fn create_ir_diff_dumper(format: TextFormat, path: &Path) -> Result<Box<dyn IrDiffDumper>, IrError> {
    match format {
        TextFormat::Json => {
            let file = File::create(path)?;
            Ok(Box::new(JsonIrDiffDumper::new(BufWriter::new(file))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format_parsing() {
        assert_eq!("json".parse::<TextFormat>().unwrap(), TextFormat::Json);
        assert_eq!("JSON".parse::<TextFormat>().unwrap(), TextFormat::Json);
        assert!(matches!(
            "protobuf".parse::<TextFormat>(),
            Err(IrError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unwind_type_stack() {
        let stack: VecDeque<String> = ["Foo", "Bar *", "Bar"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unwind_type_stack(&stack), "Foo-> Bar *-> Bar");
        assert_eq!(unwind_type_stack(&VecDeque::new()), "");
    }

    #[test]
    fn test_file_factories() {
        let dir = std::env::temp_dir().join(format!("header_abi_util_sink_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dump_path = dir.join("libfoo.lsdump");
        let diff_path = dir.join("libfoo.diff.json");

        let mut dumper = create_ir_dumper(TextFormat::Json, &dump_path, false).unwrap();
        dumper
            .add_linkable_message(&TypeIR::builtin("int", 4, false, true).into())
            .unwrap();
        dumper.add_linkable_message(&FunctionIR::new("foo", "foo", "int").into()).unwrap();
        dumper.dump().unwrap();
        drop(dumper);

        let mut reader = create_ir_reader(TextFormat::Json, &dump_path).unwrap();
        reader.read_dump().unwrap();
        assert_eq!(reader.builtin_types().len(), 1);
        let dump = reader.into_abi_dump();
        assert_eq!(dump.functions[0].name, "foo");

        let mut differ = create_ir_diff_dumper(TextFormat::Json, &diff_path).unwrap();
        differ.add_lib_name("libfoo");
        differ.add_compatibility_status(CompatibilityStatusIR::Extension);
        differ
            .add_linkable_message(&dump.functions[0].clone().into(), DiffKind::Added)
            .unwrap();
        differ.dump().unwrap();
        drop(differ);

        let report: serde_json::Value = serde_json::from_slice(&std::fs::read(&diff_path).unwrap()).unwrap();
        assert_eq!(report["lib_name"], "libfoo");
        assert_eq!(report["compatibility_status"], "extension");

        std::fs::remove_dir_all(&dir).ok();
    }
}
