use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("The product {0} was not found")]
    NotFound(u64),

    #[error("A product with code value '{0}' already exists")]
    DuplicateCodeValue(String),

    #[error("{reason}")]
    Validation { field: &'static str, reason: String },

    #[error("The product {0} is not published")]
    NotPublished(u64),

    #[error("The requested quantity of product {id} exceeds the available stock of {available}")]
    InsufficientStock { id: u64, available: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("The product {} was not found", id))
            }
            ProductError::DuplicateCodeValue(code_value) => AppError::Conflict(format!(
                "A product with code value '{}' already exists",
                code_value
            )),
            ProductError::Validation { reason, .. } => AppError::BadRequest(reason),
            ProductError::NotPublished(id) => {
                AppError::UnprocessableEntity(format!("The product {} is not published", id))
            }
            ProductError::InsufficientStock { id, available } => AppError::BadRequest(format!(
                "The requested quantity of product {} exceeds the available stock of {}",
                id, available
            )),
            ProductError::Storage(err) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
