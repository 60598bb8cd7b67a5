use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Resources are still loading")]
    NotReady,

    #[error("Recipe not found: {0}")]
    RecipeNotFound(u64),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Duplicate recipe id: {0}")]
    DuplicateRecipe(u64),

    #[error("Resource loading failed: {0}")]
    LoadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Precondition failures the caller should retry rather than report
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::NotReady)
    }
}
