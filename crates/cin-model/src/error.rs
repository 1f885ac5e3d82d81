use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown census table: {0}")]
    UnknownTable(String),
    #[error("invalid rule code: {0:?}")]
    InvalidRuleCode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
