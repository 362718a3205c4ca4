use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Snapshot size mismatch: header says {expected} records, found {found}")]
    SnapshotMismatch { expected: usize, found: usize },

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Scenario load error: {0}")]
    LoadError(#[from] crate::world::loader::LoadError),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
