// Wed Oct 14 2026 - Alex

use crate::ir::{FunctionIR, GlobalVarIR, TypeIR};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpecifierIR {
    #[default]
    Public = 1,
    Protected = 2,
    Private = 3,
}

/// Outcome of comparing two dumps of the same library. Values 2 and 3 are
/// reserved so the statuses can be or-ed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatusIR {
    #[default]
    Compatible = 0,
    Extension = 1,
    Incompatible = 4,
}

impl CompatibilityStatusIR {
    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn from_bits(bits: u32) -> Self {
        if bits & Self::Incompatible.bits() != 0 {
            Self::Incompatible
        } else if bits & Self::Extension.bits() != 0 {
            Self::Extension
        } else {
            Self::Compatible
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self::from_bits(self.bits() | other.bits())
    }

    pub fn is_breaking(self) -> bool {
        self == Self::Incompatible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkableMessageKind {
    RecordType,
    EnumType,
    PointerType,
    QualifiedType,
    ArrayType,
    LvalueReferenceType,
    RvalueReferenceType,
    BuiltinType,
    Function,
    GlobalVar,
}

impl LinkableMessageKind {
    pub fn is_type(self) -> bool {
        !matches!(self, Self::Function | Self::GlobalVar)
    }
}

/// Any entity that can be joined across two dumps by its linker set key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum LinkableMessageIR {
    Type(TypeIR),
    Function(FunctionIR),
    GlobalVar(GlobalVarIR),
}

impl LinkableMessageIR {
    pub fn linker_set_key(&self) -> &str {
        match self {
            Self::Type(t) => &t.linker_set_key,
            Self::Function(f) => &f.linker_set_key,
            Self::GlobalVar(v) => &v.linker_set_key,
        }
    }

    pub fn source_file(&self) -> &str {
        match self {
            Self::Type(t) => &t.source_file,
            Self::Function(f) => &f.source_file,
            Self::GlobalVar(v) => &v.source_file,
        }
    }

    pub fn kind(&self) -> LinkableMessageKind {
        match self {
            Self::Type(t) => t.kind(),
            Self::Function(_) => LinkableMessageKind::Function,
            Self::GlobalVar(_) => LinkableMessageKind::GlobalVar,
        }
    }

    pub fn referenced_types(&self) -> Vec<&str> {
        match self {
            Self::Type(t) => t.referenced_types(),
            Self::Function(f) => f.referenced_types(),
            Self::GlobalVar(v) => v.referenced_types(),
        }
    }
}

impl From<TypeIR> for LinkableMessageIR {
    fn from(ty: TypeIR) -> Self {
        Self::Type(ty)
    }
}

impl From<FunctionIR> for LinkableMessageIR {
    fn from(function: FunctionIR) -> Self {
        Self::Function(function)
    }
}

impl From<GlobalVarIR> for LinkableMessageIR {
    fn from(var: GlobalVarIR) -> Self {
        Self::GlobalVar(var)
    }
}

impl fmt::Display for LinkableMessageIR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind(), self.linker_set_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_status_combine() {
        use CompatibilityStatusIR::*;

        assert_eq!(Compatible.combine(Compatible), Compatible);
        assert_eq!(Compatible.combine(Extension), Extension);
        assert_eq!(Extension.combine(Incompatible), Incompatible);
        assert_eq!(Incompatible.combine(Compatible), Incompatible);
        assert_eq!(Incompatible.bits(), 4);
        assert!(Incompatible.is_breaking());
        assert!(!Extension.is_breaking());
    }
}
