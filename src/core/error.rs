use crate::core::types::SkillId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Skill not found: {0}")]
    NotFound(SkillId),

    #[error("Skill already in table: {0}")]
    DuplicateEntry(SkillId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkillError>;
