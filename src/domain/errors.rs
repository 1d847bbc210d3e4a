use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("recipient opted out: {0}")]
    OptedOut(String),
    #[error("provider send failed: {0}")]
    Provider(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
