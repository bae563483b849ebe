// Wed Oct 14 2026 - Alex

use crate::ir::ElfSymbolBinding;
use crate::symbol::{ExportedSymbolSet, SymbolError};
use goblin::elf::section_header::SHN_UNDEF;
use goblin::elf::sym::{self, Sym};
use goblin::elf::Elf;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Builds an [`ExportedSymbolSet`] from the dynamic symbol table of a shared
/// object.
pub struct ElfExportReader;

impl ElfExportReader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ExportedSymbolSet, SymbolError> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file) }?;
        log::debug!("Mapped {} ({} bytes)", path.as_ref().display(), mmap.len());
        Self::from_bytes(&mmap)
    }

    pub fn from_bytes(data: &[u8]) -> Result<ExportedSymbolSet, SymbolError> {
        let elf = Elf::parse(data).map_err(|e| SymbolError::InvalidElf(e.to_string()))?;

        let mut exports = ExportedSymbolSet::new();
        for (index, symbol) in elf.dynsyms.iter().enumerate() {
            let binding = match Self::binding_of(&symbol) {
                Some(binding) => binding,
                None => continue,
            };
            if symbol.st_shndx == SHN_UNDEF as usize {
                continue;
            }

            let name = elf
                .dynstrtab
                .get_at(symbol.st_name)
                .ok_or(SymbolError::MissingName(index))?;
            if name.is_empty() {
                continue;
            }

            match symbol.st_type() {
                sym::STT_FUNC | sym::STT_GNU_IFUNC => exports.add_function(name, binding),
                sym::STT_OBJECT | sym::STT_TLS | sym::STT_COMMON => exports.add_var(name, binding),
                _ => {}
            }
        }

        log::debug!(
            "Read {} functions and {} variables from .dynsym",
            exports.functions().len(),
            exports.vars().len()
        );
        Ok(exports)
    }

    fn binding_of(symbol: &Sym) -> Option<ElfSymbolBinding> {
        match symbol.st_bind() {
            sym::STB_GLOBAL => Some(ElfSymbolBinding::Global),
            sym::STB_WEAK => Some(ElfSymbolBinding::Weak),
            _ => None,
        }
    }
}
