use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LibraryError {
    /// Reading or writing the store file failed
    Io { path: PathBuf, source: std::io::Error },

    /// Serializing a value for storage failed
    JsonSerialize { context: String, source: serde_json::Error },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Io { path, source } => {
                write!(f, "Library store I/O error ({}): {}", path.display(), source)
            }
            LibraryError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Io { source, .. } => Some(source),
            LibraryError::JsonSerialize { source, .. } => Some(source),
        }
    }
}
