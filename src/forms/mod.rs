//! Form definitions backing the customer routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod customer;
pub mod filters;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid customer id")]
    InvalidCustomerId,

    #[error("unknown field: {0}")]
    UnknownField(String),
}
