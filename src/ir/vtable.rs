// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a single vtable slot, numbered as in the Itanium C++ ABI layout
/// builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VTableComponentKind {
    VCallOffset = 0,
    VBaseOffset = 1,
    OffsetToTop = 2,
    Rtti = 3,
    FunctionPointer = 4,
    CompleteDtorPointer = 5,
    DeletingDtorPointer = 6,
    UnusedFunctionPointer = 7,
}

impl VTableComponentKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::VCallOffset),
            1 => Some(Self::VBaseOffset),
            2 => Some(Self::OffsetToTop),
            3 => Some(Self::Rtti),
            4 => Some(Self::FunctionPointer),
            5 => Some(Self::CompleteDtorPointer),
            6 => Some(Self::DeletingDtorPointer),
            7 => Some(Self::UnusedFunctionPointer),
            _ => None,
        }
    }

    pub fn is_function(self) -> bool {
        matches!(
            self,
            Self::FunctionPointer
                | Self::CompleteDtorPointer
                | Self::DeletingDtorPointer
                | Self::UnusedFunctionPointer
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VTableComponentIR {
    pub kind: VTableComponentKind,
    /// Mangled name of the slot's target for function slots, the RTTI symbol
    /// for `Rtti`, empty for offsets.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: i64,
}

impl VTableComponentIR {
    pub fn new(kind: VTableComponentKind, name: &str, value: i64) -> Self {
        Self {
            kind,
            name: name.to_string(),
            value,
        }
    }
}

impl fmt::Display for VTableComponentIR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{:?} {}", self.kind, self.value)
        } else {
            write!(f, "{:?} {}", self.kind, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VTableLayoutIR {
    pub components: Vec<VTableComponentIR>,
}

impl VTableLayoutIR {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component(&mut self, component: VTableComponentIR) {
        self.components.push(component);
    }

    pub fn num_entries(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|c| c.kind.is_function())
            .map(|c| c.name.as_str())
    }
}

pub struct VTableLayoutBuilder {
    layout: VTableLayoutIR,
}

impl VTableLayoutBuilder {
    pub fn new() -> Self {
        Self {
            layout: VTableLayoutIR::new(),
        }
    }

    pub fn offset_to_top(mut self, value: i64) -> Self {
        self.layout
            .add_component(VTableComponentIR::new(VTableComponentKind::OffsetToTop, "", value));
        self
    }

    pub fn rtti(mut self, name: &str) -> Self {
        self.layout
            .add_component(VTableComponentIR::new(VTableComponentKind::Rtti, name, 0));
        self
    }

    pub fn function(mut self, name: &str) -> Self {
        self.layout
            .add_component(VTableComponentIR::new(VTableComponentKind::FunctionPointer, name, 0));
        self
    }

    pub fn component(mut self, component: VTableComponentIR) -> Self {
        self.layout.add_component(component);
        self
    }

    pub fn build(self) -> VTableLayoutIR {
        self.layout
    }
}

impl Default for VTableLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
