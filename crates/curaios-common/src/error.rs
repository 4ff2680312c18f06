use thiserror::Error;

#[derive(Debug, Error)]
pub enum CuraiosError {
    /// Input failed structural or safety checks before resolution began.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A genuinely empty input reached the resolver.
    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CuraiosError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CuraiosError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CuraiosError>;
