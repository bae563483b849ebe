// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionScriptError {
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VersionScriptError {
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
