// Wed Oct 14 2026 - Alex

pub mod builder;
pub mod cache;
pub mod dump;
pub mod elf;
pub mod error;
pub mod function;
pub mod json;
pub mod message;
pub mod record;
pub mod sink;
pub mod types;
pub mod vtable;

pub use builder::{IrBuilder, TypeSource};
pub use cache::TypeCache;
pub use dump::AbiDump;
pub use elf::{ElfFunctionIR, ElfObjectIR, ElfSymbolBinding, ElfSymbolIR};
pub use error::IrError;
pub use function::{FunctionIR, GlobalVarIR, ParamIR};
pub use json::{ChangedEntry, DiffReport, JsonIrDiffDumper, JsonIrDumper, JsonIrReader};
pub use message::{AccessSpecifierIR, CompatibilityStatusIR, LinkableMessageIR, LinkableMessageKind};
pub use record::{
    CXXBaseSpecifierIR, EnumFieldIR, EnumTypeIR, RecordFieldIR, RecordKind, RecordTypeIR,
    TemplateElementIR, TemplateInfoIR,
};
pub use sink::{
    create_ir_diff_dumper, create_ir_dumper, create_ir_reader, unwind_type_stack, DiffKind,
    IrDiffDumper, IrDumper, TextFormat, TextFormatToIrReader,
};
pub use types::{BuiltinTypeIR, QualifiedTypeIR, TypeIR, TypeKindIR};
pub use vtable::{VTableComponentIR, VTableComponentKind, VTableLayoutBuilder, VTableLayoutIR};
