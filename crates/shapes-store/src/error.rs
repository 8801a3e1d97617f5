use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(String),
    InvalidData(String),
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            StoreError::Parse(msg) => write!(f, "parse error: {msg}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            StoreError::UnsupportedFormat(path) => write!(
                f,
                "unsupported fact-base format: {} (expected .toml or .json)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
