use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown shipping field: {0}")]
    UnknownField(String),
    #[error("profile name must not be blank")]
    BlankProfileName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
