use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerEmail, CustomerId, CustomerName, Document, Phone};

/// Customer record as returned by the backend.
///
/// Field values are kept as received so that a record with legacy data can
/// still be listed and opened for editing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Customer {
    /// Backend identifier, absent only for records that were never saved.
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Validated, digits-only body sent on create and update requests.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CustomerPayload {
    pub name: CustomerName,
    pub document: Document,
    pub phone: Phone,
    pub email: CustomerEmail,
}

impl CustomerPayload {
    #[must_use]
    pub fn new(name: CustomerName, document: Document, phone: Phone, email: CustomerEmail) -> Self {
        Self {
            name,
            document,
            phone,
            email,
        }
    }
}
