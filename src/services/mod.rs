//! Services coordinating the listing and form state with the backend.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod customers;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-side validation blocked the operation.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    #[error("backend error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
