// Wed Oct 14 2026 - Alex

use crate::ir::{AccessSpecifierIR, VTableLayoutIR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Struct,
    Class,
    Union,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFieldIR {
    pub name: String,
    pub referenced_type: String,
    /// Offset in bits from the start of the record.
    pub offset: u64,
    #[serde(default)]
    pub access: AccessSpecifierIR,
}

impl RecordFieldIR {
    pub fn new(name: &str, referenced_type: &str, offset: u64, access: AccessSpecifierIR) -> Self {
        Self {
            name: name.to_string(),
            referenced_type: referenced_type.to_string(),
            offset,
            access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CXXBaseSpecifierIR {
    pub referenced_type: String,
    pub is_virtual: bool,
    #[serde(default)]
    pub access: AccessSpecifierIR,
}

impl CXXBaseSpecifierIR {
    pub fn new(referenced_type: &str, is_virtual: bool, access: AccessSpecifierIR) -> Self {
        Self {
            referenced_type: referenced_type.to_string(),
            is_virtual,
            access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateElementIR {
    pub referenced_type: String,
}

impl TemplateElementIR {
    pub fn new(referenced_type: &str) -> Self {
        Self {
            referenced_type: referenced_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplateInfoIR {
    pub elements: Vec<TemplateElementIR>,
}

impl TemplateInfoIR {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: TemplateElementIR) {
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.referenced_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordTypeIR {
    #[serde(default)]
    pub fields: Vec<RecordFieldIR>,
    #[serde(default)]
    pub vtable_layout: VTableLayoutIR,
    #[serde(default)]
    pub bases: Vec<CXXBaseSpecifierIR>,
    #[serde(default)]
    pub template_info: TemplateInfoIR,
    #[serde(default)]
    pub access: AccessSpecifierIR,
    #[serde(default)]
    pub record_kind: RecordKind,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl RecordTypeIR {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.record_kind = kind;
        self
    }

    pub fn with_access(mut self, access: AccessSpecifierIR) -> Self {
        self.access = access;
        self
    }

    pub fn with_vtable_layout(mut self, layout: VTableLayoutIR) -> Self {
        self.vtable_layout = layout;
        self
    }

    pub fn with_template_info(mut self, template_info: TemplateInfoIR) -> Self {
        self.template_info = template_info;
        self
    }

    pub fn add_field(&mut self, field: RecordFieldIR) {
        self.fields.push(field);
    }

    pub fn add_base(&mut self, base: CXXBaseSpecifierIR) {
        self.bases.push(base);
    }

    pub fn field(&self, name: &str) -> Option<&RecordFieldIR> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn vtable_num_entries(&self) -> usize {
        self.vtable_layout.num_entries()
    }

    pub fn is_polymorphic(&self) -> bool {
        !self.vtable_layout.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumFieldIR {
    pub name: String,
    pub value: i64,
}

impl EnumFieldIR {
    pub fn new(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnumTypeIR {
    #[serde(default)]
    pub fields: Vec<EnumFieldIR>,
    pub underlying_type: String,
    #[serde(default)]
    pub access: AccessSpecifierIR,
}

impl EnumTypeIR {
    pub fn new(underlying_type: &str) -> Self {
        Self {
            fields: Vec::new(),
            underlying_type: underlying_type.to_string(),
            access: AccessSpecifierIR::Public,
        }
    }

    pub fn add_field(&mut self, field: EnumFieldIR) {
        self.fields.push(field);
    }

    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }
}
