//! Shapes exchanged with the customer backend and the listing templates.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::types::format_phone;
use crate::forms::filters::{CustomerFilters, FilterHints};
use crate::pagination::Paginated;
use crate::state::form::FormState;
use crate::state::listing::ListingState;

/// Page envelope returned by `GET /api/v1/customer`.
///
/// `number` is 0-indexed. The envelope is owned by the backend and replaced
/// wholesale on every successful fetch.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    #[serde(default)]
    pub content: Vec<Customer>,
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub total_elements: usize,
}

/// Read request scoped to a page index, a page size and a filter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub page: usize,
    pub size: usize,
    pub filters: CustomerFilters,
}

impl CustomerListQuery {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            filters: CustomerFilters::default(),
        }
    }

    pub fn filters(mut self, filters: CustomerFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Query-string pairs for the backend. Blank filters are left out.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        pairs.extend(
            self.filters
                .active()
                .into_iter()
                .map(|(key, value)| (key, value.to_string())),
        );
        pairs
    }
}

/// Listing interaction that triggered the current request.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingEvent {
    /// A pagination control was used.
    Page,
    /// The page size selector changed.
    Size,
    /// Enter was pressed in a filter field.
    Filter,
}

/// Query parameters accepted by the customer index service.
#[derive(Debug, Default)]
pub struct IndexQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub event: Option<ListingEvent>,
    pub filters: CustomerFilters,
    /// Identifier of a listed customer to open in the edit form.
    pub edit: Option<i64>,
    /// Open the create form.
    pub new: bool,
}

/// Table row prepared for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: Option<i64>,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.map(i64::from),
            name: customer.name.clone(),
            document: customer.document.clone(),
            phone: format_phone(&customer.phone),
            email: customer.email.clone(),
        }
    }
}

/// Data required to render the customer listing template.
pub struct IndexPageData {
    pub listing: ListingState,
    pub form: FormState,
    pub filter_hints: FilterHints,
    /// Rows of the current page with the pagination footer.
    pub customers: Paginated<CustomerRow>,
}
