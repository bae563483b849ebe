// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElfSymbolBinding {
    #[default]
    Global,
    Weak,
}

/// An exported function symbol, keyed by its raw (possibly mangled) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElfFunctionIR {
    pub name: String,
    #[serde(default)]
    pub binding: ElfSymbolBinding,
}

impl ElfFunctionIR {
    pub fn new(name: &str, binding: ElfSymbolBinding) -> Self {
        Self {
            name: name.to_string(),
            binding,
        }
    }
}

/// An exported data symbol, keyed by its raw (possibly mangled) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElfObjectIR {
    pub name: String,
    #[serde(default)]
    pub binding: ElfSymbolBinding,
}

impl ElfObjectIR {
    pub fn new(name: &str, binding: ElfSymbolBinding) -> Self {
        Self {
            name: name.to_string(),
            binding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElfSymbolIR {
    Function(ElfFunctionIR),
    Object(ElfObjectIR),
}

impl ElfSymbolIR {
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Object(o) => &o.name,
        }
    }

    pub fn binding(&self) -> ElfSymbolBinding {
        match self {
            Self::Function(f) => f.binding,
            Self::Object(o) => o.binding,
        }
    }
}

impl From<ElfFunctionIR> for ElfSymbolIR {
    fn from(f: ElfFunctionIR) -> Self {
        Self::Function(f)
    }
}

impl From<ElfObjectIR> for ElfSymbolIR {
    fn from(o: ElfObjectIR) -> Self {
        Self::Object(o)
    }
}
