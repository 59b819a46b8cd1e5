use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] models::errors::ModelError),
    #[error("Submission not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{context}: {err}"))
    }
}
