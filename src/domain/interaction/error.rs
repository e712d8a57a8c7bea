use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum InteractionServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("product not found")]
    ProductNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for InteractionServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => InteractionServiceError::Invalid(msg),
            AppError::NotFound(_) => InteractionServiceError::ProductNotFound,
            _ => InteractionServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<InteractionServiceError> for AppError {
    fn from(err: InteractionServiceError) -> Self {
        match err {
            InteractionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            InteractionServiceError::ProductNotFound => {
                AppError::NotFound("Product not found".to_string())
            }
            InteractionServiceError::Dependency(msg) => AppError::DataStore(msg),
            InteractionServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
