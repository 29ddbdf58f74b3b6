use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Artifact '{name}' not found in {} (expected {name}.json or {name}.jsonl)", .dir.display())]
    MissingArtifact { name: String, dir: PathBuf },

    #[error("Malformed record in {} at line {line}: {source}", .path.display())]
    MalformedRecord {
        path:   PathBuf,
        line:   usize,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type DataResult<T> = Result<T, DataError>;
