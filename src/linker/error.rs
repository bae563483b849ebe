// Wed Oct 14 2026 - Alex

use crate::config::ConfigError;
use crate::ir::IrError;
use crate::symbol::SymbolError;
use crate::version_script::VersionScriptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
    #[error("Version script error: {0}")]
    VersionScript(#[from] VersionScriptError),
    #[error("Symbol error: {0}")]
    Symbol(#[from] SymbolError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk header directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to read {path}: {source}")]
    Dump { path: String, source: IrError },
    #[error("No input dumps")]
    NoInputs,
}
