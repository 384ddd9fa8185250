use thiserror::Error;

#[derive(Error, Debug)]
pub enum RealmError {
    #[error("Terrain is {actual}x{actual} but config.map_size is {expected}")]
    ConfigMismatch { expected: usize, actual: usize },

    #[error("Invalid table: {0} (must be one of entity, item, event)")]
    InvalidTable(String),

    #[error("Invalid event code: {0}")]
    InvalidEventCode(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RealmError>;
