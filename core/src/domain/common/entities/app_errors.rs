use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid")]
    Invalid,

    #[error("Internal server error")]
    InternalServerError,
}
