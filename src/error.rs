use thiserror::Error;

pub type Result<T> = std::result::Result<T, SurdError>;

#[derive(Debug, Error)]
pub enum SurdError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
