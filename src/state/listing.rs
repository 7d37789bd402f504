use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::dto::customers::{CustomerListQuery, CustomerPage};
use crate::forms::filters::CustomerFilters;

/// Page sizes offered by the pagination controls.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: usize = 100;
/// Largest page index a request may ask for.
pub const MAX_PAGE_INDEX: usize = i32::MAX as usize;

fn bounded_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

/// What happens to the page index when filters are submitted.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterSubmitPolicy {
    /// Re-query with the page index already shown.
    #[default]
    KeepPage,
    /// Start again from the first page.
    ResetToFirst,
}

/// User interaction on the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingAction {
    ChangePage(usize),
    ChangePageSize(usize),
    SubmitFilters(CustomerFilters),
}

/// Filters, paging position and the last fetched page of customers.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ListingState {
    pub filters: CustomerFilters,
    pub page: usize,
    pub size: usize,
    pub customers: Vec<Customer>,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Set when the last fetch failed.
    pub error: Option<String>,
    #[serde(skip)]
    policy: FilterSubmitPolicy,
}

impl ListingState {
    pub fn new(policy: FilterSubmitPolicy, size: usize) -> Self {
        Self {
            filters: CustomerFilters::default(),
            page: 0,
            size: bounded_size(size),
            customers: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            error: None,
            policy,
        }
    }

    /// Restores the paging position and filters carried by a request.
    ///
    /// Out-of-range values are clamped to `MAX_PAGE_INDEX` and `MAX_PAGE_SIZE`.
    pub fn restore(mut self, page: usize, size: usize, filters: CustomerFilters) -> Self {
        self.page = page.min(MAX_PAGE_INDEX);
        self.size = bounded_size(size);
        self.filters = filters;
        self
    }

    /// The read request matching the current position and filters.
    pub fn fetch_request(&self) -> CustomerListQuery {
        CustomerListQuery::new(self.page, self.size).filters(self.filters.clone())
    }

    /// Applies an interaction and returns the fetch it triggers.
    pub fn apply(&mut self, action: ListingAction) -> CustomerListQuery {
        match action {
            ListingAction::ChangePage(page) => {
                self.page = page.min(MAX_PAGE_INDEX);
            }
            ListingAction::ChangePageSize(size) => {
                self.size = bounded_size(size);
                self.page = 0;
            }
            ListingAction::SubmitFilters(filters) => {
                self.filters = filters;
                if self.policy == FilterSubmitPolicy::ResetToFirst {
                    self.page = 0;
                }
            }
        }
        self.fetch_request()
    }

    /// Replaces the held page with a fresh envelope.
    pub fn fetch_succeeded(&mut self, envelope: CustomerPage) {
        self.customers = envelope.content;
        self.page = envelope.number;
        self.total_elements = envelope.total_elements;
        self.total_pages = envelope.total_pages;
        self.error = None;
    }

    /// Marks the listing as failed. Previously held data is left untouched.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Finds a customer of the current page by identifier.
    pub fn find(&self, id: i64) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id.is_some_and(|cid| cid.get() == id))
    }

    /// `from–to de count` label of the pagination footer.
    pub fn range_label(&self) -> String {
        if self.total_elements == 0 {
            return format!("0–0 de {}", self.total_elements);
        }
        let from = self.page.saturating_mul(self.size).saturating_add(1);
        let to = from
            .saturating_add(self.customers.len())
            .saturating_sub(1)
            .max(from);
        format!("{from}–{to} de {}", self.total_elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CustomerId;

    fn state(policy: FilterSubmitPolicy) -> ListingState {
        ListingState::new(policy, DEFAULT_PAGE_SIZE).restore(3, 10, CustomerFilters::default())
    }

    fn filters(name: &str) -> CustomerFilters {
        CustomerFilters {
            name: Some(name.to_string()),
            ..CustomerFilters::default()
        }
    }

    #[test]
    fn page_change_keeps_size_and_filters() {
        let mut listing = state(FilterSubmitPolicy::KeepPage).restore(3, 20, filters("Ana"));

        let request = listing.apply(ListingAction::ChangePage(4));

        assert_eq!(request.page, 4);
        assert_eq!(request.size, 20);
        assert_eq!(request.filters, filters("Ana"));
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut listing = state(FilterSubmitPolicy::KeepPage);

        let request = listing.apply(ListingAction::ChangePageSize(50));

        assert_eq!(listing.page, 0);
        assert_eq!(request, CustomerListQuery::new(0, 50));
    }

    #[test]
    fn filter_submit_keeps_page_by_default() {
        let mut listing = state(FilterSubmitPolicy::KeepPage);

        let request = listing.apply(ListingAction::SubmitFilters(filters("Bia")));

        assert_eq!(request.page, 3);
        assert_eq!(request.filters, filters("Bia"));
    }

    #[test]
    fn filter_submit_can_reset_page() {
        let mut listing = state(FilterSubmitPolicy::ResetToFirst);

        let request = listing.apply(ListingAction::SubmitFilters(filters("Bia")));

        assert_eq!(request.page, 0);
    }

    #[test]
    fn successful_fetch_replaces_page_data() {
        let mut listing = state(FilterSubmitPolicy::KeepPage);
        listing.fetch_failed("timeout");

        listing.fetch_succeeded(CustomerPage {
            content: vec![Customer {
                id: Some(CustomerId::new(9).unwrap()),
                name: "Caio".to_string(),
                ..Customer::default()
            }],
            number: 1,
            total_pages: 2,
            total_elements: 11,
        });

        assert_eq!(listing.page, 1);
        assert_eq!(listing.total_pages, 2);
        assert_eq!(listing.total_elements, 11);
        assert!(listing.error.is_none());
        assert_eq!(listing.find(9).map(|c| c.name.as_str()), Some("Caio"));
        assert_eq!(listing.range_label(), "11–11 de 11");
    }

    #[test]
    fn requested_paging_is_clamped() {
        let mut listing = ListingState::new(FilterSubmitPolicy::KeepPage, DEFAULT_PAGE_SIZE)
            .restore(usize::MAX, usize::MAX, CustomerFilters::default());

        assert_eq!(listing.page, MAX_PAGE_INDEX);
        assert_eq!(listing.size, MAX_PAGE_SIZE);

        let request = listing.apply(ListingAction::ChangePage(usize::MAX));
        assert_eq!(request.page, MAX_PAGE_INDEX);
    }

    #[test]
    fn range_label_survives_huge_backend_page_number() {
        let mut listing = state(FilterSubmitPolicy::KeepPage);

        listing.fetch_succeeded(CustomerPage {
            content: vec![Customer::default()],
            number: usize::MAX / 2,
            total_pages: usize::MAX,
            total_elements: usize::MAX,
        });

        assert_eq!(
            listing.range_label(),
            format!("{max}–{max} de {max}", max = usize::MAX)
        );
    }

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let mut listing = state(FilterSubmitPolicy::KeepPage);
        listing.fetch_succeeded(CustomerPage {
            content: vec![Customer::default()],
            number: 0,
            total_pages: 1,
            total_elements: 1,
        });

        listing.fetch_failed("backend down");

        assert_eq!(listing.customers.len(), 1);
        assert_eq!(listing.error.as_deref(), Some("backend down"));
    }
}
