use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product with id {0} not found")]
    NotFound(i32),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Stable machine-readable code, used by the reply envelope
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::InvalidRequest(_) => "INVALID_REQUEST",
            CatalogError::Database(_) => "DATABASE_ERROR",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
