//! Error types for notebook operations

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while converting a notebook
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Reading, writing or renaming a file failed
    Io { path: PathBuf, message: String },
    /// Enumerating the notebook directory failed
    Walk { path: PathBuf, message: String },
    /// A document is not valid UTF-8
    Encoding(PathBuf),
    /// A rename target already exists
    RenameCollision { from: PathBuf, to: PathBuf },
    /// Pass not found in registry
    PassNotFound(String),
    /// A substitution pattern could not be built
    Pattern(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error concerns a single file, so that a run over many files can skip it.
    pub fn is_per_file(&self) -> bool {
        matches!(self, ConvertError::Io { .. } | ConvertError::Encoding(_))
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io { path, message } => {
                write!(f, "I/O error on '{}': {message}", path.display())
            }
            ConvertError::Walk { path, message } => {
                write!(f, "Cannot walk '{}': {message}", path.display())
            }
            ConvertError::Encoding(path) => {
                write!(f, "'{}' is not valid UTF-8", path.display())
            }
            ConvertError::RenameCollision { from, to } => write!(
                f,
                "Cannot rename '{}' to '{}': target exists",
                from.display(),
                to.display()
            ),
            ConvertError::PassNotFound(name) => write!(f, "Pass '{name}' not found"),
            ConvertError::Pattern(msg) => write!(f, "Invalid pattern: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<regex::Error> for ConvertError {
    fn from(err: regex::Error) -> Self {
        ConvertError::Pattern(err.to_string())
    }
}
