//! Access to the external customer backend.
//!
//! The backend is the system of record; this crate only reads pages of
//! customers and sends create/update requests. Services depend on the traits
//! so they can be exercised against in-memory fakes.

use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;
use crate::dto::customers::{CustomerListQuery, CustomerPage};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;

pub use http::HttpRepository;

#[allow(async_fn_in_trait)]
pub trait CustomerReader {
    /// `GET /api/v1/customer` scoped to a page, size and filter set.
    async fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<CustomerPage>;
}

#[allow(async_fn_in_trait)]
pub trait CustomerWriter {
    /// `POST /api/v1/customer`.
    async fn create_customer(&self, payload: &CustomerPayload) -> RepositoryResult<Customer>;
    /// `PUT /api/v1/customer/{id}`.
    async fn update_customer(
        &self,
        id: CustomerId,
        payload: &CustomerPayload,
    ) -> RepositoryResult<Customer>;
}
