// Wed Oct 14 2026 - Alex

pub mod demangle;
pub mod elf;
pub mod error;
pub mod export;

pub use demangle::{demangle_cpp, is_cpp_symbol, try_demangle, Demangler, ItaniumDemangler};
pub use elf::ElfExportReader;
pub use error::SymbolError;
pub use export::ExportedSymbolSet;
