// Wed Oct 14 2026 - Alex

use crate::ir::{
    AbiDump, CompatibilityStatusIR, DiffKind, ElfSymbolIR, IrDiffDumper, IrDumper, IrError,
    LinkableMessageIR, TextFormatToIrReader,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub struct JsonIrDumper<W: Write> {
    writer: W,
    dump: AbiDump,
    pretty_print: bool,
}

impl<W: Write> JsonIrDumper<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            dump: AbiDump::new(),
            pretty_print: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn abi_dump(&self) -> &AbiDump {
        &self.dump
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IrDumper for JsonIrDumper<W> {
    fn add_linkable_message(&mut self, message: &LinkableMessageIR) -> Result<(), IrError> {
        if message.linker_set_key().is_empty() {
            return Err(IrError::EmptyKey(message.to_string()));
        }
        self.dump.add_linkable_message(message.clone());
        Ok(())
    }

    fn add_elf_symbol(&mut self, symbol: &ElfSymbolIR) -> Result<(), IrError> {
        self.dump.add_elf_symbol(symbol.clone());
        Ok(())
    }

    fn dump(&mut self) -> Result<(), IrError> {
        if self.pretty_print {
            serde_json::to_writer_pretty(&mut self.writer, &self.dump)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.dump)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        log::debug!(
            "Dumped {} types, {} functions, {} global variables",
            self.dump.types.len(),
            self.dump.functions.len(),
            self.dump.global_vars.len()
        );
        Ok(())
    }
}

pub struct JsonIrReader<R: Read> {
    reader: Option<R>,
    dump: AbiDump,
}

impl<R: Read> JsonIrReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            dump: AbiDump::new(),
        }
    }
}

impl<R: Read> TextFormatToIrReader for JsonIrReader<R> {
    fn read_dump(&mut self) -> Result<(), IrError> {
        let reader = self.reader.take().ok_or(IrError::AlreadyRead)?;
        self.dump = serde_json::from_reader(reader)?;
        Ok(())
    }

    fn abi_dump(&self) -> &AbiDump {
        &self.dump
    }

    fn into_abi_dump(self: Box<Self>) -> AbiDump {
        self.dump
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry {
    pub type_stack: String,
    #[serde(default)]
    pub kind: DiffKind,
    pub old: LinkableMessageIR,
    pub new: LinkableMessageIR,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiffReport {
    pub lib_name: String,
    pub arch: String,
    pub compatibility_status: CompatibilityStatusIR,
    pub changed: Vec<ChangedEntry>,
    pub added: Vec<LinkableMessageIR>,
    pub removed: Vec<LinkableMessageIR>,
}

pub struct JsonIrDiffDumper<W: Write> {
    writer: W,
    report: DiffReport,
}

impl<W: Write> JsonIrDiffDumper<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            report: DiffReport::default(),
        }
    }

    pub fn report(&self) -> &DiffReport {
        &self.report
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IrDiffDumper for JsonIrDiffDumper<W> {
    fn add_changed_messages(
        &mut self,
        old: &LinkableMessageIR,
        new: &LinkableMessageIR,
        type_stack: &str,
        kind: DiffKind,
    ) -> Result<(), IrError> {
        if kind.is_lone() {
            return Err(IrError::InvalidDiffKind(kind));
        }
        self.report.changed.push(ChangedEntry {
            type_stack: type_stack.to_string(),
            kind,
            old: old.clone(),
            new: new.clone(),
        });
        Ok(())
    }

    fn add_linkable_message(&mut self, message: &LinkableMessageIR, kind: DiffKind) -> Result<(), IrError> {
        match kind {
            DiffKind::Added => self.report.added.push(message.clone()),
            DiffKind::Removed => self.report.removed.push(message.clone()),
            DiffKind::Referenced | DiffKind::Unreferenced => return Err(IrError::InvalidDiffKind(kind)),
        }
        Ok(())
    }

    fn add_lib_name(&mut self, name: &str) {
        self.report.lib_name = name.to_string();
    }

    fn add_arch(&mut self, arch: &str) {
        self.report.arch = arch.to_string();
    }

    fn add_compatibility_status(&mut self, status: CompatibilityStatusIR) {
        self.report.compatibility_status = self.report.compatibility_status.combine(status);
    }

    fn compatibility_status(&self) -> CompatibilityStatusIR {
        self.report.compatibility_status
    }

    fn dump(&mut self) -> Result<(), IrError> {
        serde_json::to_writer_pretty(&mut self.writer, &self.report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        AccessSpecifierIR, ElfFunctionIR, ElfSymbolBinding, FunctionIR, ParamIR, RecordFieldIR,
        RecordKind, RecordTypeIR, TypeIR, VTableLayoutBuilder,
    };
    use std::io::Cursor;

    fn polymorphic_dump() -> AbiDump {
        let mut record = RecordTypeIR::new()
            .with_kind(RecordKind::Class)
            .with_vtable_layout(
                VTableLayoutBuilder::new()
                    .offset_to_top(0)
                    .rtti("_ZTI5Shape")
                    .function("_ZN5Shape4areaEv")
                    .build(),
            );
        record.add_field(RecordFieldIR::new("sides", "int", 64, AccessSpecifierIR::Private));

        let mut dump = AbiDump::new();
        dump.types.push(TypeIR::builtin("int", 4, false, true));
        dump.types.push(TypeIR::record("Shape", record).with_size(16).with_alignment(8));
        dump.types.push(TypeIR::pointer("Shape", 8));
        dump.functions.push(
            FunctionIR::new("Shape::area", "_ZN5Shape4areaEv", "int").with_parameter(ParamIR::this_ptr("Shape *")),
        );
        dump.elf_functions.push(ElfFunctionIR::new("_ZN5Shape4areaEv", ElfSymbolBinding::Global));
        dump
    }

    #[test]
    fn test_dump_then_read_preserves_record_layout() {
        let original = polymorphic_dump();
        let mut dumper = JsonIrDumper::new(Vec::new()).with_pretty_print(false);
        dumper.add_abi_dump(&original).unwrap();
        dumper.dump().unwrap();
        let bytes = dumper.into_inner();

        let mut reader = JsonIrReader::new(Cursor::new(bytes));
        reader.read_dump().unwrap();

        assert_eq!(reader.abi_dump(), &original);
        let records = reader.record_types();
        assert_eq!(records.len(), 1);
        let shape = records[0].as_record().unwrap();
        assert_eq!(shape.vtable_num_entries(), 3);
        assert_eq!(shape.record_kind, RecordKind::Class);
        assert_eq!(reader.functions()[0].linker_set_key, "_ZN5Shape4areaEv");
        assert_eq!(reader.elf_functions().len(), 1);
    }

    #[test]
    fn test_reader_cannot_be_read_twice() {
        let mut reader = JsonIrReader::new(Cursor::new(b"{}".to_vec()));
        reader.read_dump().unwrap();
        assert!(reader.abi_dump().is_empty());
        assert!(matches!(reader.read_dump(), Err(IrError::AlreadyRead)));
    }

    #[test]
    fn test_diff_dumper_accumulates_status() {
        let mut differ = JsonIrDiffDumper::new(Vec::new());
        differ.add_lib_name("libshape");
        differ.add_arch("arm64");

        let old: LinkableMessageIR = TypeIR::builtin("int", 4, false, true).into();
        let new: LinkableMessageIR = TypeIR::builtin("int", 8, false, true).into();
        differ.add_linkable_messages(&old, &new, "Shape-> int").unwrap();
        differ.add_compatibility_status(CompatibilityStatusIR::Incompatible);

        let added: LinkableMessageIR = FunctionIR::new("g", "g", "int").into();
        differ.add_linkable_message(&added, DiffKind::Added).unwrap();
        differ.add_compatibility_status(CompatibilityStatusIR::Extension);

        assert_eq!(differ.compatibility_status(), CompatibilityStatusIR::Incompatible);
        differ.dump().unwrap();

        let report: DiffReport = serde_json::from_slice(&differ.into_inner()).unwrap();
        assert_eq!(report.lib_name, "libshape");
        assert_eq!(report.arch, "arm64");
        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0].type_stack, "Shape-> int");
        assert_eq!(report.added.len(), 1);
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_diff_kinds() {
        let mut differ = JsonIrDiffDumper::new(Vec::new());
        let old: LinkableMessageIR = TypeIR::builtin("long", 4, false, true).into();
        let new: LinkableMessageIR = TypeIR::builtin("long", 8, false, true).into();

        differ.add_linkable_messages(&old, &new, "f-> long").unwrap();
        differ
            .add_changed_messages(&old, &new, "Unused-> long", DiffKind::Unreferenced)
            .unwrap();
        assert!(matches!(
            differ.add_changed_messages(&old, &new, "", DiffKind::Added),
            Err(IrError::InvalidDiffKind(DiffKind::Added))
        ));
        assert!(matches!(
            differ.add_linkable_message(&old, DiffKind::Unreferenced),
            Err(IrError::InvalidDiffKind(DiffKind::Unreferenced))
        ));
        differ.add_linkable_message(&old, DiffKind::Removed).unwrap();

        let kinds: Vec<DiffKind> = differ.report().changed.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![DiffKind::Referenced, DiffKind::Unreferenced]);
        assert_eq!(differ.report().removed.len(), 1);
        assert!(differ.report().added.is_empty());
    }

    #[test]
    fn test_dumper_rejects_empty_key() {
        let mut dumper = JsonIrDumper::new(Vec::new());
        let f: LinkableMessageIR = FunctionIR::new("f", "", "int").into();
        assert!(matches!(dumper.add_linkable_message(&f), Err(IrError::EmptyKey(_))));
    }
}
