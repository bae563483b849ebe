// Wed Oct 14 2026 - Alex

use crate::ir::{
    ElfFunctionIR, ElfObjectIR, ElfSymbolIR, FunctionIR, GlobalVarIR, LinkableMessageIR,
    LinkableMessageKind, TypeIR,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One translation unit's or one library's worth of ABI entities, in
/// emission order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AbiDump {
    #[serde(default)]
    pub types: Vec<TypeIR>,
    #[serde(default)]
    pub functions: Vec<FunctionIR>,
    #[serde(default)]
    pub global_vars: Vec<GlobalVarIR>,
    #[serde(default)]
    pub elf_functions: Vec<ElfFunctionIR>,
    #[serde(default)]
    pub elf_objects: Vec<ElfObjectIR>,
}

impl AbiDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_linkable_message(&mut self, message: LinkableMessageIR) {
        match message {
            LinkableMessageIR::Type(t) => self.types.push(t),
            LinkableMessageIR::Function(f) => self.functions.push(f),
            LinkableMessageIR::GlobalVar(v) => self.global_vars.push(v),
        }
    }

    pub fn add_elf_symbol(&mut self, symbol: ElfSymbolIR) {
        match symbol {
            ElfSymbolIR::Function(f) => self.elf_functions.push(f),
            ElfSymbolIR::Object(o) => self.elf_objects.push(o),
        }
    }

    fn types_of(&self, kind: LinkableMessageKind) -> impl Iterator<Item = &TypeIR> {
        self.types.iter().filter(move |t| t.kind() == kind)
    }

    pub fn record_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::RecordType)
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::EnumType)
    }

    pub fn pointer_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::PointerType)
    }

    pub fn lvalue_reference_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::LvalueReferenceType)
    }

    pub fn rvalue_reference_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::RvalueReferenceType)
    }

    pub fn qualified_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::QualifiedType)
    }

    pub fn array_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::ArrayType)
    }

    pub fn builtin_types(&self) -> impl Iterator<Item = &TypeIR> {
        self.types_of(LinkableMessageKind::BuiltinType)
    }

    pub fn type_by_key(&self, key: &str) -> Option<&TypeIR> {
        self.types.iter().find(|t| t.linker_set_key == key)
    }

    pub fn function_by_key(&self, key: &str) -> Option<&FunctionIR> {
        self.functions.iter().find(|f| f.linker_set_key == key)
    }

    pub fn global_var_by_key(&self, key: &str) -> Option<&GlobalVarIR> {
        self.global_vars.iter().find(|v| v.linker_set_key == key)
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.functions.len() + self.global_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the entities of `other` whose linker set keys are not yet
    /// present. The first occurrence of a key wins.
    pub fn merge(&mut self, other: AbiDump) {
        let mut types: IndexMap<String, TypeIR> = self
            .types
            .drain(..)
            .map(|t| (t.linker_set_key.clone(), t))
            .collect();
        for t in other.types {
            types.entry(t.linker_set_key.clone()).or_insert(t);
        }
        self.types = types.into_values().collect();

        let mut seen: HashSet<String> = self.functions.iter().map(|f| f.linker_set_key.clone()).collect();
        self.functions
            .extend(other.functions.into_iter().filter(|f| seen.insert(f.linker_set_key.clone())));

        let mut seen: HashSet<String> = self.global_vars.iter().map(|v| v.linker_set_key.clone()).collect();
        self.global_vars
            .extend(other.global_vars.into_iter().filter(|v| seen.insert(v.linker_set_key.clone())));

        let mut seen: HashSet<String> = self.elf_functions.iter().map(|f| f.name.clone()).collect();
        self.elf_functions
            .extend(other.elf_functions.into_iter().filter(|f| seen.insert(f.name.clone())));

        let mut seen: HashSet<String> = self.elf_objects.iter().map(|o| o.name.clone()).collect();
        self.elf_objects
            .extend(other.elf_objects.into_iter().filter(|o| seen.insert(o.name.clone())));
    }
}
