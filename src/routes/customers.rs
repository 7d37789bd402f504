use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::customer::Customer;
use crate::dto::customers::{IndexPageData, IndexQuery, ListingEvent};
use crate::forms::customer::{CustomerField, SaveCustomerForm};
use crate::forms::filters::CustomerFilters;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{Alert, base_context, collect_alerts, redirect, render_template};
use crate::services::ServiceError;
use crate::services::customers::{
    build_page_data, load_index_page, refresh_listing, restore_listing, save_customer,
    save_error_message,
};
use crate::state::form::FormState;
use crate::state::listing::ListingState;

const CUSTOMERS_PATH: &str = "/customers";

/// Query string of the customer listing.
///
/// An empty `page` or `size` is read as absent so a cleared field does not
/// fail the request. Blank filter inputs arrive as empty strings and are
/// dropped when the backend query is built.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQueryParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub action: Option<ListingEvent>,
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub edit: Option<i64>,
    pub new: Option<String>,
}

impl From<CustomersQueryParams> for IndexQuery {
    fn from(params: CustomersQueryParams) -> Self {
        IndexQuery {
            page: params.page,
            size: params.size,
            event: params.action,
            filters: CustomerFilters {
                name: params.name,
                document: params.document,
                phone: params.phone,
                email: params.email,
            },
            edit: params.edit,
            new: params.new.is_some_and(|v| !v.is_empty()),
        }
    }
}

fn parse_query(query: &str) -> Result<CustomersQueryParams, serde::de::value::Error> {
    serde_html_form::from_str(query)
}

/// Query string restoring the listing exactly as rendered.
pub fn listing_query(listing: &ListingState) -> String {
    serde_html_form::to_string(listing.fetch_request().to_pairs()).unwrap_or_default()
}

/// Same as [`listing_query`] without the page, for links that set it.
pub fn listing_base_query(listing: &ListingState) -> String {
    let pairs: Vec<(&str, String)> = listing
        .fetch_request()
        .to_pairs()
        .into_iter()
        .filter(|(key, _)| *key != "page")
        .collect();
    serde_html_form::to_string(pairs).unwrap_or_default()
}

fn customers_url(query: &str) -> String {
    if query.is_empty() {
        CUSTOMERS_PATH.to_string()
    } else {
        format!("{CUSTOMERS_PATH}?{query}")
    }
}

fn render_index(tera: &Tera, mut context: Context, data: IndexPageData) -> HttpResponse {
    context.insert("customers", &data.customers);
    context.insert("filters", &data.listing.filters);
    context.insert("filter_hints", &data.filter_hints);
    context.insert("listing_error", &data.listing.error);
    context.insert("back", &listing_query(&data.listing));
    context.insert("base_query", &listing_base_query(&data.listing));
    context.insert("form_open", &data.form.is_open());
    context.insert("helpers", &data.form.helper_texts());
    context.insert("form", &data.form);
    render_template(tera, "customers/index.html", &context)
}

#[get("/customers")]
pub async fn show_customers(
    req: HttpRequest,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(e) => {
            log::warn!("Invalid listing query '{}': {e}", req.query_string());
            FlashMessage::error("Parâmetros de listagem inválidos.").send();
            return redirect(CUSTOMERS_PATH);
        }
    };

    let data = load_index_page(
        repo.get_ref(),
        params.into(),
        &server_config.listing_settings(),
    )
    .await;

    let alerts = collect_alerts(&flash_messages);
    render_index(&tera, base_context(&alerts, "customers"), data)
}

#[post("/customers/save")]
pub async fn save_customer_form(
    body: web::Bytes,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form: SaveCustomerForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(e) => {
            log::error!("Failed to parse customer form: {e}");
            FlashMessage::error("Erro ao processar o formulário.").send();
            return redirect(CUSTOMERS_PATH);
        }
    };

    // The return query is re-serialized so only listing keys survive.
    let back_params = parse_query(&form.back).unwrap_or_default();
    let settings = server_config.listing_settings();
    let mut listing = restore_listing(
        &IndexQuery {
            event: None,
            ..IndexQuery::from(back_params)
        },
        &settings,
    );
    let back = listing_query(&listing);

    let (id, draft) = match form.into_parts() {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("Rejected customer form: {e}");
            FlashMessage::error(save_error_message(&ServiceError::from(e))).send();
            return redirect(&customers_url(&back));
        }
    };

    let existing = id.map(|id| Customer {
        id: Some(id),
        ..Customer::default()
    });
    let mut form_state = FormState::initialize(existing.as_ref());
    form_state.update_field(CustomerField::Name, draft.name);
    form_state.update_field(CustomerField::Document, draft.document);
    form_state.update_field(CustomerField::Phone, draft.phone);
    form_state.update_field(CustomerField::Email, draft.email);

    match save_customer(repo.get_ref(), &mut form_state).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message()).send();
            redirect(&customers_url(&back))
        }
        Err(err) => {
            let mut alerts = collect_alerts(&flash_messages);
            // Field errors are shown inline under the inputs.
            if !matches!(err, ServiceError::Form(_)) {
                alerts.push(Alert::error(save_error_message(&err)));
            }
            refresh_listing(repo.get_ref(), &mut listing).await;
            let data = build_page_data(listing, form_state);
            render_index(&tera, base_context(&alerts, "customers"), data)
        }
    }
}
