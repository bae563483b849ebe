// Wed Oct 14 2026 - Alex

use crate::ir::{AbiDump, ElfSymbolIR, FunctionIR, GlobalVarIR, IrError, TypeCache, TypeIR};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// The front end's view of every type it knows about, looked up by linker
/// set key. The builder pulls referenced types through this when completing
/// an entity.
pub trait TypeSource {
    fn lookup_type(&self, key: &str) -> Option<TypeIR>;
}

impl TypeSource for HashMap<String, TypeIR> {
    fn lookup_type(&self, key: &str) -> Option<TypeIR> {
        self.get(key).cloned()
    }
}

impl TypeSource for IndexMap<String, TypeIR> {
    fn lookup_type(&self, key: &str) -> Option<TypeIR> {
        self.get(key).cloned()
    }
}

impl<T: TypeSource + ?Sized> TypeSource for &T {
    fn lookup_type(&self, key: &str) -> Option<TypeIR> {
        (**self).lookup_type(key)
    }
}

/// Builds a closed dump: every reference emitted resolves to a key emitted
/// in the same dump.
pub struct IrBuilder<S: TypeSource> {
    source: S,
    type_cache: TypeCache,
    decl_keys: HashSet<String>,
    dump: AbiDump,
}

impl<S: TypeSource> IrBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            type_cache: TypeCache::new(),
            decl_keys: HashSet::new(),
            dump: AbiDump::new(),
        }
    }

    pub fn type_cache(&self) -> &TypeCache {
        &self.type_cache
    }

    pub fn dump(&self) -> &AbiDump {
        &self.dump
    }

    /// Emits `ty` and, transitively, everything it references. Returns false
    /// when the key was already emitted. On error nothing from this call
    /// stays in the cache or the dump.
    pub fn add_type(&mut self, ty: TypeIR) -> Result<bool, IrError> {
        self.atomically(|builder, cached| builder.emit_type(ty, cached))
    }

    pub fn add_function(&mut self, function: FunctionIR) -> Result<(), IrError> {
        if function.linker_set_key.is_empty() {
            return Err(IrError::EmptyKey(function.name));
        }
        if self.decl_keys.contains(&function.linker_set_key) {
            return Err(IrError::DuplicateKey(function.linker_set_key));
        }

        self.atomically(|builder, cached| {
            for reference in function.referenced_types() {
                builder.complete_reference(&function.linker_set_key, reference, cached)?;
            }
            Ok(())
        })?;

        self.decl_keys.insert(function.linker_set_key.clone());
        self.dump.functions.push(function);
        Ok(())
    }

    pub fn add_global_var(&mut self, var: GlobalVarIR) -> Result<(), IrError> {
        if var.linker_set_key.is_empty() {
            return Err(IrError::EmptyKey(var.name));
        }
        if self.decl_keys.contains(&var.linker_set_key) {
            return Err(IrError::DuplicateKey(var.linker_set_key));
        }

        self.atomically(|builder, cached| {
            for reference in var.referenced_types() {
                builder.complete_reference(&var.linker_set_key, reference, cached)?;
            }
            Ok(())
        })?;

        self.decl_keys.insert(var.linker_set_key.clone());
        self.dump.global_vars.push(var);
        Ok(())
    }

    pub fn add_elf_symbol(&mut self, symbol: ElfSymbolIR) {
        self.dump.add_elf_symbol(symbol);
    }

    pub fn finish(self) -> AbiDump {
        self.dump
    }

    /// Runs `f`, then drops every key it cached and every type it emitted
    /// if it fails, so a failed completion never leaves a dangling key.
    fn atomically<T>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut Vec<String>) -> Result<T, IrError>,
    ) -> Result<T, IrError> {
        let emitted = self.dump.types.len();
        let mut cached = Vec::new();

        let result = f(self, &mut cached);
        if result.is_err() {
            log::debug!("Rolling back {} types", cached.len());
            self.dump.types.truncate(emitted);
            for key in &cached {
                self.type_cache.remove(key);
            }
        }
        result
    }

    fn emit_type(&mut self, ty: TypeIR, cached: &mut Vec<String>) -> Result<bool, IrError> {
        if ty.linker_set_key.is_empty() {
            return Err(IrError::EmptyKey(ty.name));
        }

        // Cached before recursing so self-referential graphs terminate.
        if !self.type_cache.insert(&ty.linker_set_key) {
            return Ok(false);
        }
        cached.push(ty.linker_set_key.clone());

        for reference in ty.referenced_types() {
            self.complete_reference(&ty.linker_set_key, reference, cached)?;
        }

        log::trace!("Emitting type {}", ty.linker_set_key);
        self.dump.types.push(ty);
        Ok(true)
    }

    fn complete_reference(&mut self, from: &str, key: &str, cached: &mut Vec<String>) -> Result<(), IrError> {
        if key.is_empty() || self.type_cache.contains(key) {
            return Ok(());
        }

        let ty = self
            .source
            .lookup_type(key)
            .ok_or_else(|| IrError::UnresolvedReference {
                from: from.to_string(),
                to: key.to_string(),
            })?;

        if ty.linker_set_key != key {
            return Err(IrError::KeyMismatch {
                requested: key.to_string(),
                found: ty.linker_set_key,
            });
        }

        self.emit_type(ty, cached).map(|_| ())
    }
}
