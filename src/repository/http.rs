//! `reqwest` implementation of the customer repository traits.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;
use crate::dto::customers::{CustomerListQuery, CustomerPage};
use crate::repository::errors::{RepositoryError, RepositoryResult, error_message};
use crate::repository::{CustomerReader, CustomerWriter};

const CUSTOMER_PATH: &str = "/api/v1/customer";

/// Customer backend reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{CUSTOMER_PATH}", self.base_url)
    }

    fn item_url(&self, id: CustomerId) -> String {
        format!("{}{CUSTOMER_PATH}/{id}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> RepositoryResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(&body);
        log::warn!(
            "Customer backend answered {status}: {}",
            message.as_deref().unwrap_or("<no message>")
        );
        Err(RepositoryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl CustomerReader for HttpRepository {
    async fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<CustomerPage> {
        let request = self.client.get(self.collection_url()).query(&query.to_pairs());
        Self::send(request).await
    }
}

impl CustomerWriter for HttpRepository {
    async fn create_customer(&self, payload: &CustomerPayload) -> RepositoryResult<Customer> {
        let request = self.client.post(self.collection_url()).json(payload);
        Self::send(request).await
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        payload: &CustomerPayload,
    ) -> RepositoryResult<Customer> {
        let request = self.client.put(self.item_url(id)).json(payload);
        Self::send(request).await
    }
}
