// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid ELF image: {0}")]
    InvalidElf(String),
    #[error("Missing dynamic string for symbol at index {0}")]
    MissingName(usize),
}
