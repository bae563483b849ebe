// Wed Oct 14 2026 - Alex

use crate::ir::{AccessSpecifierIR, TemplateInfoIR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamIR {
    pub referenced_type: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_this_ptr: bool,
}

impl ParamIR {
    pub fn new(referenced_type: &str, is_default: bool) -> Self {
        Self {
            referenced_type: referenced_type.to_string(),
            is_default,
            is_this_ptr: false,
        }
    }

    pub fn this_ptr(referenced_type: &str) -> Self {
        Self {
            referenced_type: referenced_type.to_string(),
            is_default: false,
            is_this_ptr: true,
        }
    }
}

/// The ABI surface of a function declaration. There is no body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionIR {
    pub name: String,
    /// Mangled name for C++, plain name for C.
    pub linker_set_key: String,
    #[serde(default)]
    pub source_file: String,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParamIR>,
    #[serde(default)]
    pub access: AccessSpecifierIR,
    #[serde(default)]
    pub template_info: TemplateInfoIR,
}

impl FunctionIR {
    pub fn new(name: &str, linker_set_key: &str, return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            linker_set_key: linker_set_key.to_string(),
            source_file: String::new(),
            return_type: return_type.to_string(),
            parameters: Vec::new(),
            access: AccessSpecifierIR::Public,
            template_info: TemplateInfoIR::new(),
        }
    }

    pub fn with_source_file(mut self, source_file: &str) -> Self {
        self.source_file = source_file.to_string();
        self
    }

    pub fn with_access(mut self, access: AccessSpecifierIR) -> Self {
        self.access = access;
        self
    }

    pub fn with_parameter(mut self, param: ParamIR) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn add_parameter(&mut self, param: ParamIR) {
        self.parameters.push(param);
    }

    pub fn referenced_type(&self) -> &str {
        &self.return_type
    }

    pub fn referenced_types(&self) -> Vec<&str> {
        std::iter::once(self.return_type.as_str())
            .chain(self.parameters.iter().map(|p| p.referenced_type.as_str()))
            .chain(self.template_info.referenced_types())
            .filter(|r| !r.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalVarIR {
    pub name: String,
    pub linker_set_key: String,
    #[serde(default)]
    pub source_file: String,
    pub referenced_type: String,
    #[serde(default)]
    pub access: AccessSpecifierIR,
}

impl GlobalVarIR {
    pub fn new(name: &str, linker_set_key: &str, referenced_type: &str) -> Self {
        Self {
            name: name.to_string(),
            linker_set_key: linker_set_key.to_string(),
            source_file: String::new(),
            referenced_type: referenced_type.to_string(),
            access: AccessSpecifierIR::Public,
        }
    }

    pub fn with_source_file(mut self, source_file: &str) -> Self {
        self.source_file = source_file.to_string();
        self
    }

    pub fn referenced_types(&self) -> Vec<&str> {
        if self.referenced_type.is_empty() {
            Vec::new()
        } else {
            vec![self.referenced_type.as_str()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TemplateElementIR;

    #[test]
    fn test_function_references() {
        let mut f = FunctionIR::new("Foo::bar", "_ZN3Foo3barEi", "void")
            .with_parameter(ParamIR::this_ptr("Foo *"))
            .with_parameter(ParamIR::new("int", true));
        f.template_info.add_element(TemplateElementIR::new("char"));

        assert_eq!(f.referenced_type(), "void");
        assert_eq!(f.referenced_types(), vec!["void", "Foo *", "int", "char"]);
        assert!(f.parameters[0].is_this_ptr);
        assert!(f.parameters[1].is_default);
    }

    #[test]
    fn test_global_var_references() {
        let v = GlobalVarIR::new("counter", "counter", "int");
        assert_eq!(v.referenced_types(), vec!["int"]);
    }
}
