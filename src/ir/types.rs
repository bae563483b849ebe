// Wed Oct 14 2026 - Alex

use crate::ir::{AccessSpecifierIR, EnumTypeIR, LinkableMessageKind, RecordTypeIR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type as it appears in an ABI dump. Every reference to another entity is
/// that entity's linker set key, never a pointer, so two dumps produced by
/// unrelated processes can be compared key by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeIR {
    pub name: String,
    pub linker_set_key: String,
    /// Empty for builtin types.
    #[serde(default)]
    pub source_file: String,
    /// Pointee, element, referent or qualified type, depending on the kind.
    #[serde(default)]
    pub referenced_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub alignment: u32,
    pub body: TypeKindIR,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKindIR {
    Record(RecordTypeIR),
    Enum(EnumTypeIR),
    Array,
    Pointer,
    Builtin(BuiltinTypeIR),
    LvalueReference,
    RvalueReference,
    Qualified(QualifiedTypeIR),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct BuiltinTypeIR {
    pub is_unsigned: bool,
    pub is_integral: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct QualifiedTypeIR {
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_restricted: bool,
}

impl TypeIR {
    pub fn new(name: &str, body: TypeKindIR) -> Self {
        Self {
            name: name.to_string(),
            linker_set_key: name.to_string(),
            source_file: String::new(),
            referenced_type: String::new(),
            size: 0,
            alignment: 0,
            body,
        }
    }

    pub fn builtin(name: &str, size: u64, is_unsigned: bool, is_integral: bool) -> Self {
        Self::new(name, TypeKindIR::Builtin(BuiltinTypeIR { is_unsigned, is_integral }))
            .with_size(size)
            .with_alignment(natural_alignment(size))
    }

    pub fn pointer(pointee: &str, size: u64) -> Self {
        Self::new(&format!("{} *", pointee), TypeKindIR::Pointer)
            .with_referenced_type(pointee)
            .with_size(size)
            .with_alignment(natural_alignment(size))
    }

    pub fn lvalue_reference(referent: &str, size: u64) -> Self {
        Self::new(&format!("{} &", referent), TypeKindIR::LvalueReference)
            .with_referenced_type(referent)
            .with_size(size)
            .with_alignment(natural_alignment(size))
    }

    pub fn rvalue_reference(referent: &str, size: u64) -> Self {
        Self::new(&format!("{} &&", referent), TypeKindIR::RvalueReference)
            .with_referenced_type(referent)
            .with_size(size)
            .with_alignment(natural_alignment(size))
    }

    /// The size saturates at `u64::MAX` for absurd element counts.
    pub fn array(element: &str, count: u64, element_size: u64, alignment: u32) -> Self {
        Self::new(&format!("{}[{}]", element, count), TypeKindIR::Array)
            .with_referenced_type(element)
            .with_size(element_size.saturating_mul(count))
            .with_alignment(alignment)
    }

    pub fn qualified(base: &str, qualifiers: QualifiedTypeIR) -> Self {
        let mut name = String::new();
        if qualifiers.is_const {
            name.push_str("const ");
        }
        if qualifiers.is_volatile {
            name.push_str("volatile ");
        }
        if qualifiers.is_restricted {
            name.push_str("restrict ");
        }
        name.push_str(base);
        Self::new(&name, TypeKindIR::Qualified(qualifiers)).with_referenced_type(base)
    }

    pub fn record(name: &str, record: RecordTypeIR) -> Self {
        Self::new(name, TypeKindIR::Record(record))
    }

    pub fn enumeration(name: &str, enum_type: EnumTypeIR) -> Self {
        Self::new(name, TypeKindIR::Enum(enum_type))
    }

    pub fn with_linker_set_key(mut self, key: &str) -> Self {
        self.linker_set_key = key.to_string();
        self
    }

    pub fn with_source_file(mut self, source_file: &str) -> Self {
        self.source_file = source_file.to_string();
        self
    }

    pub fn with_referenced_type(mut self, referenced_type: &str) -> Self {
        self.referenced_type = referenced_type.to_string();
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn kind(&self) -> LinkableMessageKind {
        match &self.body {
            TypeKindIR::Record(_) => LinkableMessageKind::RecordType,
            TypeKindIR::Enum(_) => LinkableMessageKind::EnumType,
            TypeKindIR::Array => LinkableMessageKind::ArrayType,
            TypeKindIR::Pointer => LinkableMessageKind::PointerType,
            TypeKindIR::Builtin(_) => LinkableMessageKind::BuiltinType,
            TypeKindIR::LvalueReference => LinkableMessageKind::LvalueReferenceType,
            TypeKindIR::RvalueReference => LinkableMessageKind::RvalueReferenceType,
            TypeKindIR::Qualified(_) => LinkableMessageKind::QualifiedType,
        }
    }

    pub fn as_record(&self) -> Option<&RecordTypeIR> {
        match &self.body {
            TypeKindIR::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumTypeIR> {
        match &self.body {
            TypeKindIR::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_builtin(&self) -> Option<&BuiltinTypeIR> {
        match &self.body {
            TypeKindIR::Builtin(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_qualified(&self) -> Option<&QualifiedTypeIR> {
        match &self.body {
            TypeKindIR::Qualified(q) => Some(q),
            _ => None,
        }
    }

    pub fn access(&self) -> AccessSpecifierIR {
        match &self.body {
            TypeKindIR::Record(r) => r.access,
            TypeKindIR::Enum(e) => e.access,
            _ => AccessSpecifierIR::Public,
        }
    }

    /// Every linker set key this type points at, in declaration order. May
    /// contain duplicates.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        if !self.referenced_type.is_empty() {
            refs.push(self.referenced_type.as_str());
        }

        match &self.body {
            TypeKindIR::Record(record) => {
                refs.extend(record.fields.iter().map(|f| f.referenced_type.as_str()));
                refs.extend(record.bases.iter().map(|b| b.referenced_type.as_str()));
                refs.extend(record.template_info.referenced_types());
            }
            TypeKindIR::Enum(e) => {
                if !e.underlying_type.is_empty() {
                    refs.push(e.underlying_type.as_str());
                }
            }
            _ => {}
        }

        refs.retain(|r| !r.is_empty());
        refs
    }
}

/// Scalars are aligned to their size. Sizes past `u32::MAX` clamp.
fn natural_alignment(size: u64) -> u32 {
    u32::try_from(size).unwrap_or(u32::MAX)
}

impl fmt::Display for TypeIR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {}, align {})", self.name, self.size, self.alignment)
    }
}
