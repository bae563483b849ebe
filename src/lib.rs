// Wed Oct 14 2026 - Alex

pub mod config;
pub mod ir;
pub mod linker;
pub mod pattern;
pub mod symbol;
pub mod ui;
pub mod utils;
pub mod version_script;

pub use config::Config;
pub use ir::{AbiDump, IrBuilder, IrDiffDumper, IrDumper, TextFormatToIrReader};
pub use linker::{collect_exported_headers, Linker};
pub use symbol::{ExportedSymbolSet, ItaniumDemangler};
pub use version_script::{VersionScriptParser, FUTURE_API_LEVEL};
