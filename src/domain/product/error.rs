use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ProductServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ProductServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ProductServiceError::Invalid(msg),
            _ => ProductServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ProductServiceError> for AppError {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ProductServiceError::Dependency(msg) => AppError::DataStore(msg),
            ProductServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
