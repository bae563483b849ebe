// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unresolved type reference `{to}` from `{from}`")]
    UnresolvedReference { from: String, to: String },
    #[error("Type source returned `{found}` when asked for `{requested}`")]
    KeyMismatch { requested: String, found: String },
    #[error("Duplicate linker set key: {0}")]
    DuplicateKey(String),
    #[error("Diff kind {0:?} does not apply here")]
    InvalidDiffKind(crate::ir::DiffKind),
    #[error("Entity has an empty linker set key: {0}")]
    EmptyKey(String),
    #[error("Unsupported text format: {0}")]
    UnsupportedFormat(String),
    #[error("Dump already consumed")]
    AlreadyRead,
}
