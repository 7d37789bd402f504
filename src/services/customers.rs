use crate::domain::customer::Customer;
use crate::dto::customers::{CustomerRow, IndexPageData, IndexQuery, ListingEvent};
use crate::pagination::Paginated;
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::state::form::{FormState, SubmitRequest};
use crate::state::listing::{FilterSubmitPolicy, ListingAction, ListingState};

pub const LOAD_FAILED_MESSAGE: &str = "Erro ao carregar clientes.";
pub const SAVE_FAILED_MESSAGE: &str = "Erro ao salvar o cliente.";

/// Listing behaviour taken from the server configuration.
#[derive(Clone, Copy, Debug)]
pub struct ListingSettings {
    pub policy: FilterSubmitPolicy,
    pub default_page_size: usize,
}

/// Result of an accepted create or update.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Customer),
    Updated(Customer),
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Created(_) => "Cliente criado com sucesso!",
            SaveOutcome::Updated(_) => "Cliente atualizado com sucesso!",
        }
    }
}

/// Notification text for a failed save.
///
/// Uses the backend's own message when its error payload had one.
pub fn save_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Repository(e) => e
            .backend_message()
            .unwrap_or(SAVE_FAILED_MESSAGE)
            .to_string(),
        _ => SAVE_FAILED_MESSAGE.to_string(),
    }
}

/// Rebuilds the listing from the request and applies the triggering event.
pub fn restore_listing(query: &IndexQuery, settings: &ListingSettings) -> ListingState {
    let size = query.size.unwrap_or(settings.default_page_size);
    let page = query.page.unwrap_or(0);
    let mut listing = ListingState::new(settings.policy, settings.default_page_size).restore(
        page,
        size,
        query.filters.clone(),
    );

    match query.event {
        Some(ListingEvent::Page) => {
            listing.apply(ListingAction::ChangePage(page));
        }
        Some(ListingEvent::Size) => {
            listing.apply(ListingAction::ChangePageSize(size));
        }
        Some(ListingEvent::Filter) => {
            listing.apply(ListingAction::SubmitFilters(query.filters.clone()));
        }
        None => {}
    }
    listing
}

/// Issues the listing's fetch request and folds the outcome into it.
pub async fn refresh_listing<R>(repo: &R, listing: &mut ListingState)
where
    R: CustomerReader,
{
    let request = listing.fetch_request();
    match repo.list_customers(&request).await {
        Ok(envelope) => listing.fetch_succeeded(envelope),
        Err(err) => {
            log::error!("Failed to list customers: {err}");
            listing.fetch_failed(LOAD_FAILED_MESSAGE);
        }
    }
}

/// Loads the listing page, optionally opening the create or edit form.
pub async fn load_index_page<R>(
    repo: &R,
    query: IndexQuery,
    settings: &ListingSettings,
) -> IndexPageData
where
    R: CustomerReader,
{
    let mut listing = restore_listing(&query, settings);
    refresh_listing(repo, &mut listing).await;

    let form = if query.new {
        FormState::initialize(None)
    } else if let Some(id) = query.edit {
        match listing.find(id) {
            Some(customer) => FormState::initialize(Some(customer)),
            None => {
                log::warn!("Customer {id} is not on the current page, form not opened");
                FormState::closed()
            }
        }
    } else {
        FormState::closed()
    };

    build_page_data(listing, form)
}

/// Assembles the data rendered by the listing template.
pub fn build_page_data(listing: ListingState, form: FormState) -> IndexPageData {
    let rows = listing.customers.iter().map(CustomerRow::from).collect();
    let customers = Paginated::new(
        rows,
        listing.page,
        listing.size,
        listing.total_pages,
        listing.total_elements,
        listing.range_label(),
    );
    let filter_hints = listing.filters.hints();

    IndexPageData {
        listing,
        form,
        filter_hints,
        customers,
    }
}

/// Validates the form and sends the create or update request.
///
/// A validation failure returns before any request is made. On backend
/// failure the form is reopened with its draft intact.
pub async fn save_customer<R>(repo: &R, form: &mut FormState) -> ServiceResult<SaveOutcome>
where
    R: CustomerWriter,
{
    let request = form.submit()?;

    let result = match &request {
        SubmitRequest::Create(payload) => repo.create_customer(payload).await.map(SaveOutcome::Created),
        SubmitRequest::Update(id, payload) => repo
            .update_customer(*id, payload)
            .await
            .map(SaveOutcome::Updated),
    };

    match result {
        Ok(outcome) => {
            form.submit_succeeded();
            Ok(outcome)
        }
        Err(err) => {
            log::error!("Failed to save customer: {err}");
            form.submit_failed();
            Err(ServiceError::from(err))
        }
    }
}
